pub mod auth_flow;
pub mod session_source;

#[cfg(test)]
pub(crate) mod test_support;
