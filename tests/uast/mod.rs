mod tests_properties;
mod tests_scenarios;
#[cfg(feature = "serde")]
mod tests_serde;
