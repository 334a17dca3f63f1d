use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "invoicer_access_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get the access token from localStorage, if a session exists.
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}
