use thiserror::Error;

/// Error returned by every validating GPIO operation.
///
/// The driver has a single failure mode: an argument that does not describe
/// something the chip can do. Nothing is written to hardware when it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GpioError {
    #[error("invalid argument")]
    InvalidArgument,
}

pub type Result<T> = core::result::Result<T, GpioError>;

/// Validates a condition, logging and returning `GpioError::InvalidArgument` when it
/// does not hold.
///
/// ```ignore
/// gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
/// ```
macro_rules! gpio_check {
    ( $cond:expr, $($arg:tt)+ ) => {
        if !($cond) {
            log::error!(target: $crate::config::GPIO_TAG, $($arg)+);
            return Err($crate::sdk::error::GpioError::InvalidArgument);
        }
    };
}

pub(crate) use gpio_check;
