use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;

use crate::{build_router, create_app_state, db::initialize};

/// Create a test server backed by an in-memory database.
///
/// `seed` runs against the initialized database before the server takes ownership of it.
pub(crate) fn get_test_server(seed: impl FnOnce(&Connection)) -> TestServer {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&conn).expect("Could not initialize database.");
    seed(&conn);

    let state = create_app_state(conn).expect("Could not create app state.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

#[track_caller]
pub(crate) fn get_header(response: &TestResponse, header_name: &str) -> String {
    response
        .header(header_name)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_attachment(response: &TestResponse, content_type: &str, file_name: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
    assert_eq!(
        get_header(response, "content-disposition"),
        format!("attachment; filename={file_name}")
    );
    assert_eq!(
        get_header(response, "content-length"),
        response.as_bytes().len().to_string()
    );
}
