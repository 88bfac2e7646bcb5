use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use rawhttp::http::Method;
use rawhttp::{ClientConfig, DispatchConfig, Dispatcher, Error, HttpClient, QueryArgs};

/// Accept `n` connections, answering each with `respond` and returning what
/// was received.
fn serve<F>(n: usize, respond: F) -> (u16, JoinHandle<Vec<String>>)
where
    F: Fn(&mut TcpStream) -> String + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let mut received = vec![];
        for _ in 0..n {
            let (mut stream, _) = listener.accept().unwrap();
            received.push(respond(&mut stream));
        }
        received
    });

    (port, handle)
}

/// Reads until the client half-closes. Only works if it does.
fn read_to_eof_and_reply(stream: &mut TcpStream) -> String {
    let mut input = String::new();
    stream.read_to_string(&mut input).unwrap();
    stream
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello")
        .unwrap();
    input
}

/// Reads head and a content-length body, then replies and closes.
fn read_form_and_reply(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut head = String::new();
    let mut length = 0;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if let Some(v) = line.strip_prefix("Content-Length: ") {
            length = v.trim().parse().unwrap();
        }
        head.push_str(&line);
        if line == "\r\n" {
            break;
        }
    }

    let mut body = vec![0; length];
    reader.read_exact(&mut body).unwrap();
    let body = String::from_utf8(body).unwrap();

    let reply = format!(
        "HTTP/1.1 201 Created\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(reply.as_bytes()).unwrap();

    format!("{}{}", head, body)
}

fn client() -> HttpClient {
    HttpClient::new(ClientConfig::default().user_agent("loopback"))
}

#[test]
fn get_over_tcp() {
    let (port, server) = serve(1, read_to_eof_and_reply);

    let args = QueryArgs::from([("q", "a b")]);
    let url = format!("http://127.0.0.1:{}/search", port);
    let res = client().get(&url, Some(&args)).unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.header("Content-Type"), Some("text/plain"));
    assert_eq!(res.body(), "hello");

    let received = server.join().unwrap();
    assert_eq!(
        received[0],
        "GET /search?q=a+b HTTP/1.1\r\n\
        Host: 127.0.0.1\r\n\
        User-Agent: loopback\r\n\
        Connection: keep-alive\r\n\
        Accept: */*\r\n\
        \r\n"
    );
}

#[test]
fn post_over_tcp() {
    let (port, server) = serve(1, read_form_and_reply);

    let args = QueryArgs::from(vec![("k", "v"), ("name", "a&b")]);
    let url = format!("http://127.0.0.1:{}/form", port);
    let res = client().post(&url, Some(&args)).unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(res.body(), "k=v&name=a%26b");

    let received = server.join().unwrap();
    assert_eq!(
        received[0],
        format!(
            "POST {} HTTP/1.1\r\n\
            Host: 127.0.0.1\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: 14\r\n\
            \r\n\
            k=v&name=a%26b",
            url
        )
    );
}

#[test]
fn malformed_response_over_tcp() {
    let (port, server) = serve(1, |stream| {
        let mut input = String::new();
        stream.read_to_string(&mut input).unwrap();
        stream.write_all(b"HTTP/1.1 200 OK\r\n").unwrap();
        input
    });

    let url = format!("http://127.0.0.1:{}/", port);
    let err = client().get(&url, None).unwrap_err();
    assert!(matches!(err, Error::MalformedResponse));

    server.join().unwrap();
}

#[test]
fn connection_refused() {
    // Bind and drop to find a port nobody listens on.
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };

    let url = format!("http://127.0.0.1:{}/", port);
    let err = client().get(&url, None).unwrap_err();
    assert!(matches!(err, Error::Connection { port: p, .. } if p == port));
}

#[test]
fn dispatch_over_tcp() {
    let (port, server) = serve(12, read_to_eof_and_reply);

    let dispatcher = Dispatcher::new(
        client(),
        DispatchConfig {
            requests: 12,
            concurrency: 4,
        },
    );

    let url = format!("http://127.0.0.1:{}/", port);
    let mut bodies = vec![];
    let summary = dispatcher
        .run(Method::GET, &url, None, |_, res| {
            bodies.push(res.as_ref().unwrap().body().to_string());
        })
        .unwrap();

    assert_eq!(summary.succeeded, 12);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.statuses.get(&200), Some(&12));
    assert!(bodies.iter().all(|b| b == "hello"));

    let received = server.join().unwrap();
    assert_eq!(received.len(), 12);
    assert!(received.iter().all(|r| r.starts_with("GET / HTTP/1.1\r\n")));
}
