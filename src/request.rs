use crate::command::Command;

pub(crate) const MAX_REQUEST_LEN: usize = 1024;

const PATH: &str = "/php/httptest.php";

/// Renders the POST request for one command. The Content-Length header is
/// computed from the actual body, never assumed.
pub(crate) fn build(host: &str, command: Command) -> String {
    let body = format!("function={}", command.code());
    let request = format!(
        "POST {PATH} HTTP/1.1\r\n\
         Host: {host}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    );
    debug_assert!(request.len() <= MAX_REQUEST_LEN);
    request
}
