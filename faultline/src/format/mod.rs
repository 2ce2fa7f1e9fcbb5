pub mod ansi;
pub mod backtrace;
pub mod ctx;
pub mod factory;
pub mod helpers;
pub mod options;
pub mod presenter;
pub mod source;
pub mod styler;
pub mod truncate;

#[cfg(test)]
mod backtrace_test;
#[cfg(test)]
mod factory_test;
#[cfg(test)]
pub(crate) mod test_support;
