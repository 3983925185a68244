//! Drive the CLI host pieces against a live mock server.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use todo_cli::{commands, render, Command, Prompt, UreqTransport};
use todo_core::{ClientError, ErrorClass, TodoApi, TodoClient, TodoId, TransportErrorKind};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

/// Accepts one connection, reads the request head and answers with `reply` verbatim.
fn answer_once(reply: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                return;
            }
            head.extend_from_slice(&buf[..n]);
        }
        stream.write_all(reply).unwrap();
    });
    addr
}

fn client_for(
    addr: SocketAddr,
    answers: &'static str,
) -> TodoClient<UreqTransport, Prompt<&'static [u8], std::io::Sink>> {
    TodoClient::new(
        TodoApi::new(&format!("http://{addr}{}", mock_server::API_PREFIX)),
        UreqTransport::new(Duration::from_secs(5)),
        Prompt::new(answers.as_bytes(), std::io::sink()),
    )
}

fn add(title: &str, description: &str) -> Command {
    Command::Add {
        title: title.to_string(),
        description: description.to_string(),
    }
}

#[test]
fn commands_round_trip_through_the_server() {
    let addr = start_server();
    let mut client = client_for(addr, "n\ny\n");

    commands::run(&mut client, Command::List).unwrap();
    assert_eq!(render(client.state()), format!("{}\n", todo_cli::render::EMPTY_MESSAGE));

    commands::run(&mut client, add("Buy milk", "")).unwrap();
    commands::run(&mut client, add("Walk dog", "before dinner")).unwrap();
    let titles: Vec<_> = client.state().items().iter().map(|t| t.title.clone()).collect();
    assert_eq!(titles, ["Walk dog", "Buy milk"]);
    let milk = client.state().items()[1].id.clone();

    commands::run(&mut client, Command::Toggle { id: milk.to_string() }).unwrap();
    assert!(client.state().item(&milk).unwrap().completed);

    commands::run(
        &mut client,
        Command::Edit {
            id: milk.to_string(),
            title: Some("Buy oat milk".to_string()),
            description: None,
        },
    )
    .unwrap();
    let out = render(client.state());
    assert!(out.contains(&format!("[x] Buy oat milk  ({milk})")), "{out}");

    // First answer is "n": nothing is deleted.
    commands::run(&mut client, Command::Rm { id: milk.to_string(), yes: false }).unwrap();
    assert!(client.state().item(&milk).is_some());

    // Second answer is "y".
    commands::run(&mut client, Command::Rm { id: milk.to_string(), yes: false }).unwrap();
    assert!(client.state().item(&milk).is_none());
    assert_eq!(client.state().items().len(), 1);
}

#[test]
fn blank_title_is_reported_without_a_request() {
    let addr = start_server();
    let mut client = client_for(addr, "");

    let err = commands::run(&mut client, add("   ", "")).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Validation);
    assert!(render(client.state()).starts_with("error: title must not be empty\n"));

    commands::run(&mut client, Command::List).unwrap();
    assert!(client.state().items().is_empty());
}

#[test]
fn toggle_of_unknown_id_fails_locally() {
    let addr = start_server();
    let mut client = client_for(addr, "");

    let err = commands::run(&mut client, Command::Toggle { id: "nope".to_string() }).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(todo_core::ValidationError::UnknownItem(ref id)) if *id == TodoId::from("nope")
    ));
}

#[test]
fn closed_port_is_a_connect_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();
    let mut client = client_for(addr, "");

    let err = commands::run(&mut client, Command::List).unwrap_err();
    match err {
        ClientError::Network(transport) => assert_eq!(transport.kind, TransportErrorKind::Connect),
        other => panic!("expected a network error, got {other:?}"),
    }
    assert!(render(client.state()).starts_with("error: could not reach the todo server"));
}

#[test]
fn binary_error_page_is_a_protocol_error() {
    let addr = answer_once(
        b"HTTP/1.1 502 Bad Gateway\r\n\
          Content-Type: application/octet-stream\r\n\
          Content-Length: 10\r\n\
          Connection: close\r\n\
          \r\n\
          \x89PNG\r\n\x1a\n\xff\xfe",
    );
    let mut client = client_for(addr, "");

    let err = client.fetch_all().unwrap_err();
    assert_eq!(err.class(), ErrorClass::Protocol, "{err}");
    assert!(matches!(
        err,
        ClientError::Protocol(todo_core::ProtocolError::NotJson { status: 502, .. })
    ));
    assert!(!render(client.state()).contains("could not reach"));
}

#[test]
fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        std::thread::sleep(Duration::from_secs(5));
        drop(stream);
    });
    let mut client = TodoClient::new(
        TodoApi::new(&format!("http://{addr}{}", mock_server::API_PREFIX)),
        UreqTransport::new(Duration::from_secs(1)),
        Prompt::new(&b""[..], std::io::sink()),
    );

    match client.fetch_all().unwrap_err() {
        ClientError::Network(transport) => assert_eq!(transport.kind, TransportErrorKind::Timeout),
        other => panic!("expected a timeout, got {other:?}"),
    }
}
