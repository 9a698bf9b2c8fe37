use braid_ioc::{global, Args, Injectable, Param, ResolutionError};
use std::sync::Arc;

// A leaf dependency with no constructor parameters of its own.
struct HttpClient;

impl HttpClient {
  fn fetch(&self, url: &str) -> String {
    format!("GET {url} -> 200 OK")
  }
}

impl Injectable for HttpClient {
  const NAME: &'static str = "HttpClient";

  fn assemble(_args: &mut Args) -> Result<Self, ResolutionError> {
    Ok(HttpClient)
  }
}

// A service that declares its dependency; the container resolves and
// injects it positionally.
struct ReportService {
  client: Arc<HttpClient>,
}

impl ReportService {
  fn generate(&self) -> String {
    self.client.fetch("https://example.com/metrics")
  }
}

impl Injectable for ReportService {
  const NAME: &'static str = "ReportService";
  const PARAMS: &'static [Param] = &[Param::typed("client", "HttpClient")];

  fn assemble(args: &mut Args) -> Result<Self, ResolutionError> {
    Ok(ReportService {
      client: args.take::<HttpClient>()?,
    })
  }
}

fn main() -> Result<(), ResolutionError> {
  // Declare the blueprints once; after that, any part of the application
  // can resolve the graph by name.
  global().declare::<HttpClient>();
  global().declare::<ReportService>();

  // The client is shared; every report service gets the same one.
  global().singleton_type("HttpClient");

  let reports = global().make::<ReportService>("ReportService")?;
  println!("{}", reports.generate());

  let again = global().make::<ReportService>("ReportService")?;
  assert!(Arc::ptr_eq(&reports.client, &again.client));
  println!("Both report services share one HttpClient.");

  Ok(())
}
