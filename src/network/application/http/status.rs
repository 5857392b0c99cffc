//! Response status codes.

/// Status codes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Status {
    /// 200
    Ok = 200,
    /// 204
    NoContent = 204,
    /// 400
    BadRequest = 400,
    /// 401
    Unauthorized = 401,
    /// 404
    NotFound = 404,
    /// 410
    Gone = 410,
    /// 412
    PreconditionFailed = 412,
    /// 500
    InternalServerError = 500,
}

impl Status {
    /// Numeric status code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Reason phrase sent on the status line.
    pub fn reason(self) -> &'static str {
        reason_phrase(self.code())
    }
}

impl From<Status> for u16 {
    fn from(status: Status) -> u16 {
        status.code()
    }
}

/// Reason phrase for any numeric code; codes outside the table map to
/// `"Unknown"`.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        204 => "No content",
        400 => "Bad request",
        401 => "Authorization Required",
        404 => "Not Found",
        410 => "Done",
        412 => "Precondition Failed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
