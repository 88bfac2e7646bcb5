use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rawhttp::http::Method;
use rawhttp::{ClientConfig, DispatchConfig, Dispatcher, HostDelays, HttpClient, QueryArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rawhttp", version)]
#[command(about = "Fire many GET or POST requests at an url over raw tcp sockets", long_about = None)]
struct Cli {
    /// GET or POST, then the url. With only an url, GET is used.
    #[arg(value_name = "[METHOD] URL", num_args = 1..=2, required = true)]
    target: Vec<String>,

    /// Number of requests to make.
    #[arg(short = 'n', long, env = "RAWHTTP_REQUESTS", default_value_t = 200)]
    requests: usize,

    /// Max number of requests in flight at once.
    #[arg(short, long, env = "RAWHTTP_CONCURRENCY", default_value_t = 200)]
    concurrency: usize,

    /// Form argument, query for GET and body for POST. Repeatable.
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_pair)]
    data: Vec<(String, String)>,

    /// Query string sent verbatim with GET.
    #[arg(long, value_name = "RAW", conflicts_with = "data")]
    query: Option<String>,

    /// Wait before half-closing GET requests to this host. Repeatable.
    #[arg(long, value_name = "HOST=MILLIS", value_parser = parse_delay)]
    delay: Vec<(String, Duration)>,

    /// Do not apply the built in host delays.
    #[arg(long)]
    no_default_delays: bool,

    /// Value of the User-Agent header.
    #[arg(long)]
    user_agent: Option<String>,

    /// Only print the summary, not every response.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))?;
    Ok((k.to_string(), v.to_string()))
}

fn parse_delay(s: &str) -> Result<(String, Duration), String> {
    let (host, millis) = parse_pair(s)?;
    let millis: u64 = millis
        .parse()
        .map_err(|_| format!("delay is not a number of milliseconds: {:?}", millis))?;
    Ok((host, Duration::from_millis(millis)))
}

fn parse_method(s: &str) -> Option<Method> {
    if s.eq_ignore_ascii_case("GET") {
        Some(Method::GET)
    } else if s.eq_ignore_ascii_case("POST") {
        Some(Method::POST)
    } else {
        None
    }
}

impl Cli {
    fn method_and_url(&self) -> (Method, &str) {
        match self.target.as_slice() {
            [url] => (Method::GET, url.as_str()),
            [method, url] => {
                let Some(method) = parse_method(method) else {
                    Cli::command()
                        .error(
                            ErrorKind::InvalidValue,
                            format!("method must be GET or POST, got {:?}", method),
                        )
                        .exit();
                };
                (method, url.as_str())
            }
            _ => unreachable!("clap limits the number of positionals"),
        }
    }

    fn args(&self) -> Option<QueryArgs> {
        if let Some(raw) = &self.query {
            Some(QueryArgs::Raw(raw.clone()))
        } else if !self.data.is_empty() {
            Some(QueryArgs::Pairs(self.data.clone()))
        } else {
            None
        }
    }

    fn client_config(&self) -> ClientConfig {
        let mut delays = if self.no_default_delays {
            HostDelays::empty()
        } else {
            HostDelays::default()
        };

        for (host, delay) in &self.delay {
            delays.insert(host.clone(), *delay);
        }

        let config = ClientConfig::default().host_delays(delays);

        match &self.user_agent {
            Some(v) => config.user_agent(v.clone()),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rawhttp=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let (method, url) = cli.method_and_url();

    let client = HttpClient::new(cli.client_config());
    let dispatcher = Dispatcher::new(
        client,
        DispatchConfig {
            requests: cli.requests,
            concurrency: cli.concurrency,
        },
    );

    let quiet = cli.quiet;
    let stdout = io::stdout();

    let result = dispatcher.run(method, url, cli.args(), |_, result| {
        if quiet {
            return;
        }
        if let Ok(res) = result {
            let mut out = stdout.lock();
            // Closed stdout, e.g. piped to head, is not a reason to stop.
            let _ = writeln!(out, "{}", res.status());
            let _ = writeln!(out, "{}", res.body());
        }
    });

    match result {
        Ok(summary) => {
            for (status, count) in &summary.statuses {
                log::info!("{}: {}", status, count);
            }
            if summary.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
