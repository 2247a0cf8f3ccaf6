pub(crate) mod day_plans;
pub(crate) mod error;
pub(crate) mod linear;
#[cfg(test)]
pub(crate) mod test_support;

pub(crate) use error::ApiError;
