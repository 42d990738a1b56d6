//! HTTP status line parsing.

/// Reason phrase from a raw status line (`HTTP/1.1 404 Not Found` -> `Not Found`).
/// HTTP/2 has no reason phrase; those fall back to [`canonical_reason`].
pub(crate) fn reason_from_status_line(line: &str, code: u32) -> String {
    let mut parts = line.trim().splitn(3, ' ');
    let _version = parts.next();
    let _code = parts.next();
    match parts.next().map(str::trim).filter(|r| !r.is_empty()) {
        Some(reason) => reason.to_string(),
        None => canonical_reason(code).to_string(),
    }
}

/// Standard reason phrase for the codes a CDN or relay is likely to send.
pub(crate) fn canonical_reason(code: u32) -> &'static str {
    match code {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown Status",
    }
}

pub(crate) fn is_status_line(line: &str) -> bool {
    line.starts_with("HTTP/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http1_reason_phrase_kept() {
        assert_eq!(reason_from_status_line("HTTP/1.1 404 Not Found\r\n", 404), "Not Found");
        assert_eq!(
            reason_from_status_line("HTTP/1.1 418 I'm a teapot", 418),
            "I'm a teapot"
        );
    }

    #[test]
    fn http2_falls_back_to_canonical() {
        assert_eq!(reason_from_status_line("HTTP/2 503", 503), "Service Unavailable");
        assert_eq!(reason_from_status_line("HTTP/2 599 ", 599), "Unknown Status");
    }
}
