/// Cookie carrying the packed access token for browser requests.
pub const SESSION_COOKIE: &str = "session";
/// Where pages send visitors who are signed in without the admin flag.
pub const DENIED_REDIRECT: &str = "/?denied=1";
pub const HOME: &str = "/";
