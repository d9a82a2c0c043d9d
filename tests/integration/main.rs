//! End-to-end tests driving the HTTP API against in-memory stores.

mod helpers;

mod presence_test;
mod subscription_test;
