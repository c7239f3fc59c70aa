#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{assert_attachment, get_header, get_test_server};
