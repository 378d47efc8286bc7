//! Request host handling for brand lookups.

const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Split `host[:port]` into its name and optional port
fn split_port(host: &str) -> (&str, Option<&str>) {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => {
            (name, Some(port))
        }
        _ => (host, None),
    }
}

/// Whether the host (with or without port) points at the local machine
pub fn is_local_host(host: &str) -> bool {
    let (name, _) = split_port(host.trim());
    LOCAL_HOSTS
        .iter()
        .any(|local| name.eq_ignore_ascii_case(local))
}

/// Normalize a host for brand lookup.
///
/// The port is stripped for `localhost` and `127.0.0.1` only; ports on any
/// other host are kept because non-local deployments may route on them.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    let (name, port) = split_port(&host);
    match port {
        Some(_) if LOCAL_HOSTS.contains(&name) => name.to_string(),
        _ => host,
    }
}

/// Build the request origin (`scheme://host`) used to resolve default asset paths.
pub fn request_origin(host: &str, forwarded_proto: Option<&str>) -> String {
    let scheme = match forwarded_proto.map(str::trim).filter(|p| !p.is_empty()) {
        Some(proto) => proto.to_ascii_lowercase(),
        None if is_local_host(host) => "http".to_string(),
        None => "https".to_string(),
    };
    format!("{}://{}", scheme, host.trim())
}
