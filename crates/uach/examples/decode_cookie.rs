use http::Request;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use uach_cookie::codec::CookieDecoder;

// User-Agent from the request
const USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Mobile Safari/537.36";

// The entire cookie header, the length-bin encoded hints live in `wuach`
const COOKIE_HEADER: &str = "_ga=GA1.1.1431215539.1748352436; wuach=bS4yLj8xdWFmdi4xNS4iMTM3LjAuNzE1MS41NSJmdmwuOTAuIk5vdDsgQSBCcmFuZCI7dj0iMjQuMC4wIiwgIkNocm9taXVtIjt2PSIxMzcuMC43MTUxLjU1IiwgIkdvb2dsZSBDaHJvbWUiO3Y9IjEzNy4wLjcxNTEuNTUibWQuMTMuIlBpeGVsIDkgUHJvInAuOS4iQW5kcm9pZCJwdi40LiIxNSI=";

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let hints = match CookieDecoder::default().decode(COOKIE_HEADER) {
        Ok(hints) => hints,
        Err(e) => {
            error!(cause = %e, kind = ?e.kind(), "unparsable cookie string");
            return;
        }
    };

    let mut request = match Request::get("http://example.com").header(http::header::USER_AGENT, USER_AGENT).body(()) {
        Ok(request) => request,
        Err(e) => {
            error!(cause = %e, "error creating a http request");
            return;
        }
    };

    if let Err(e) = hints.apply_to_request(&mut request) {
        error!(cause = %e, "error copying client hints onto the request");
        return;
    }

    // the request is now ready for a device lookup
    for (name, value) in request.headers() {
        info!(header = %name, value = ?value, "request header");
    }
}
