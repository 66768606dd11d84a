//! Loopback HTTP responder shared by the integration tests

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// Serve the given `(status, body)` replies in order, one per connection,
/// and return the raw requests received
pub fn serve_replies(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in replies {
            let (mut stream, _) = listener.accept().unwrap();
            requests.push(read_request(&mut stream));
            let response = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        requests
    });
    (format!("http://{}", addr), handle)
}

/// Accept one connection, read the request and never answer
pub fn serve_silently() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let _ = read_request(&mut stream);
        thread::sleep(std::time::Duration::from_secs(10));
    });
    format!("http://{}", addr)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// JSON body of a raw request
pub fn request_body(request: &str) -> serde_json::Value {
    let body = request.split("\r\n\r\n").nth(1).unwrap_or("");
    serde_json::from_str(body).unwrap()
}

/// `[{"OrderID":"A1","RequiredWagons":3,...},{"OrderID":"A2",...}]`, percent-encoded
pub const ORDERS_LINK: &str = "https://forms.example.com/confirm?data=%255B%257B%2522OrderID%2522%253A%2522A1%2522%252C%2522SupplierName%2522%253A%2522Holz%2520GmbH%2522%252C%2522RequiredWagons%2522%253A3%252C%2522Transportdatum%2522%253A%252205.03.2024%2522%252C%2522deliveryDate%2522%253A%252206.03.2024%2522%252C%2522Departure%2522%253A%2522Linz%2522%252C%2522Destination%2522%253A%2522Graz%2522%257D%252C%257B%2522OrderID%2522%253A%2522A2%2522%252C%2522Transportdatum%2522%253A%252207.03.2024%2522%252C%2522deliveryDate%2522%253A%252208.03.2024%2522%257D%255D";
