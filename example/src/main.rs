use waku::{Request, Response, Server, from_fn, http::StatusCode};

fn main() {
    env_logger::init();

    // usage: example [address] [port] [workers]
    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "0.0.0.0".to_owned());
    let port = args.next().and_then(|p| p.parse().ok()).unwrap_or(3000);
    let workers = args.next().and_then(|w| w.parse().ok()).unwrap_or(4);

    let server = match Server::bind(&address, port, workers) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    log::info!("listening on {}", server.local_addr());

    server.run(from_fn(handle));
}

async fn handle(req: Request) -> Response {
    let mut res = Response::new();

    match req.uri.as_str() {
        "/" => res.html("<h1>waku</h1><p>It works.</p>"),
        "/json" => res.json(r#"{"ok":true}"#),
        "/echo" => {
            res.cookie("visited", "true", "Path=/")
                .body(&req.body)
        }
        _ => res.status(StatusCode::NOT_FOUND).text("not found"),
    };

    res
}
