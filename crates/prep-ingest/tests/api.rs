//! Integration tests for the API loader against a local HTTP endpoint.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use polars::prelude::DataType;
use prep_ingest::{ApiOptions, IngestError, load_api, load_api_with_options};

/// What the mock endpoint does with the single request it accepts.
enum Reply {
    Respond { status: &'static str, body: String },
    Stall(Duration),
}

fn read_request(stream: &TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    while reader.read_line(&mut line).unwrap_or(0) > 0 {
        if line == "\r\n" {
            break;
        }
        line.clear();
    }
}

fn serve_once(reply: Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock endpoint");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        read_request(&stream);
        match reply {
            Reply::Respond { status, body } => {
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
            Reply::Stall(duration) => thread::sleep(duration),
        }
    });
    format!("http://{addr}/rows")
}

#[test]
fn loads_data_array_into_frame() {
    let body = r#"{"data": [{"name": "Ada", "score": 3}, {"name": "Grace", "score": 5}]}"#;
    let url = serve_once(Reply::Respond {
        status: "200 OK",
        body: body.to_string(),
    });

    let df = load_api(&url).expect("load api");

    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.column("score").unwrap().dtype(), &DataType::Int64);
}

#[test]
fn server_error_is_no_data() {
    let url = serve_once(Reply::Respond {
        status: "500 Internal Server Error",
        body: "{\"error\": \"boom\"}".to_string(),
    });

    let err = load_api(&url).unwrap_err();

    assert!(err.is_no_data());
    match err {
        IngestError::ApiStatus { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn missing_data_key_is_no_data() {
    let url = serve_once(Reply::Respond {
        status: "200 OK",
        body: r#"{"items": []}"#.to_string(),
    });

    let err = load_api(&url).unwrap_err();

    assert!(err.is_no_data());
    assert!(matches!(err, IngestError::ApiResponse { .. }));
}

#[test]
fn invalid_json_is_no_data() {
    let url = serve_once(Reply::Respond {
        status: "200 OK",
        body: "<html>nope</html>".to_string(),
    });

    let err = load_api(&url).unwrap_err();

    assert!(matches!(err, IngestError::ApiResponse { .. }));
}

#[test]
fn slow_endpoint_times_out_as_no_data() {
    let url = serve_once(Reply::Stall(Duration::from_secs(3)));
    let options = ApiOptions {
        timeout: Duration::from_millis(300),
    };

    let err = load_api_with_options(&url, &options).unwrap_err();

    assert!(err.is_no_data());
    assert!(
        matches!(err, IngestError::ApiTimeout { .. }),
        "expected timeout, got {err:?}"
    );
}

#[test]
fn unreachable_endpoint_is_no_data() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}/rows");

    let err = load_api(&url).unwrap_err();

    assert!(err.is_no_data());
}
