//! Candidate path derivation from a record URL.

use url::Url;

/// Rooted, cleaned path for a URL: `/<host[:port]>/<path>`.
///
/// The path keeps its percent-encoding, so `%2F` never adds a directory level.
/// Query and fragment are ignored. Cleaning is rooted, so `..` segments cannot
/// climb above the host directory.
pub fn candidate_path(url: &Url) -> String {
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };
    let path = clean_path(url.path());
    clean_path(&format!("/{}/{}", host, path))
}

/// Lexical path cleaning: collapses repeated separators, drops `.` segments,
/// resolves `..` against the preceding segment and removes any trailing slash.
///
/// Rooted paths stay rooted (`/..` is `/`); an empty relative result is `.`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
