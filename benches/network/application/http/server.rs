use criterion::{Criterion, Throughput};
use emberhttp::network::application::http::{Config, HandlerError, Method, Resources, Server};
use emberhttp::network::error::Error;
use emberhttp::network::{Close, Connection, Interest, Listen, Read, Select, Tcp, Write};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct Pipe {
    inbound: VecDeque<Vec<u8>>,
    written: usize,
}

/// In-memory socket: reads scripted segments, discards writes.
struct MemSocket(Rc<RefCell<Pipe>>);

impl Read for MemSocket {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut pipe = self.0.borrow_mut();
        let Some(mut segment) = pipe.inbound.pop_front() else {
            return Ok(0);
        };
        let len = segment.len().min(buf.len());
        buf[..len].copy_from_slice(&segment[..len]);
        if len < segment.len() {
            segment.drain(..len);
            pipe.inbound.push_front(segment);
        }
        Ok(len)
    }
}

impl Write for MemSocket {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.borrow_mut().written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MemSocket {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for MemSocket {}

impl Tcp for MemSocket {
    fn tx_space(&self) -> usize {
        4 * 1024
    }

    fn is_connected(&self) -> bool {
        true
    }
}

struct OneShotListener(Option<MemSocket>);

impl Listen for OneShotListener {
    type Connection = MemSocket;
    type Error = Error;

    fn accept(&mut self) -> Result<Option<Self::Connection>, Self::Error> {
        Ok(self.0.take())
    }
}

struct ReadySelector;

impl Select<MemSocket> for ReadySelector {
    type Error = Error;

    fn register(&mut self, _: &MemSocket, _: Interest) -> Result<(), Self::Error> {
        Ok(())
    }

    fn deregister(&mut self, _: &MemSocket, _: Interest) -> Result<(), Self::Error> {
        Ok(())
    }

    fn select(&mut self, _: u32) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn signal(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

type BenchServer<'r> = Server<'r, OneShotListener, ReadySelector, 1>;

fn connected<'r>(resources: &'r Resources<'r>) -> (BenchServer<'r>, Rc<RefCell<Pipe>>) {
    let pipe = Rc::new(RefCell::new(Pipe::default()));
    let listener = OneShotListener(Some(MemSocket(Rc::clone(&pipe))));
    let mut server = Server::new(Config::default(), resources, listener, ReadySelector);
    server.poll().unwrap();
    (server, pipe)
}

/// Poll until the request is answered.
fn serve(server: &mut BenchServer<'_>, pipe: &RefCell<Pipe>, request: &[u8], response_len: usize) {
    pipe.borrow_mut().inbound.push_back(request.to_vec());
    pipe.borrow_mut().written = 0;
    while pipe.borrow().written < response_len {
        server.poll().unwrap();
    }
}

pub fn bench_static_get(c: &mut Criterion) {
    let page = vec![b'x'; 16 * 1024];
    let mut resources = Resources::new();
    resources.register_file("/index.html", &page).unwrap();
    let (mut server, pipe) = connected(&resources);

    let request = b"GET /index.html HTTP/1.1\r\nHost: device.local\r\n\r\n";
    let mut group = c.benchmark_group("http_server");
    group.throughput(Throughput::Bytes(page.len() as u64));
    group.bench_function("static_get_16k", |b| {
        b.iter(|| serve(&mut server, &pipe, request, page.len()))
    });
    group.finish();
}

pub fn bench_post_body(c: &mut Criterion) {
    let sink = |out: &mut [u8], input: &[u8]| -> Result<usize, HandlerError> {
        if input.is_empty() {
            out[..2].copy_from_slice(b"ok");
            return Ok(2);
        }
        Ok(0)
    };
    let mut resources = Resources::new();
    resources.register_handler(Method::Post, "/upload", &sink).unwrap();
    let (mut server, pipe) = connected(&resources);

    let body = vec![b'y'; 8 * 1024];
    let mut request = format!(
        "POST /upload HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    request.extend_from_slice(&body);

    let mut group = c.benchmark_group("http_server");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("post_body_8k", |b| {
        b.iter(|| serve(&mut server, &pipe, &request, 2))
    });
    group.finish();
}
