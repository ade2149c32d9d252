pub mod gpio;
pub mod io_mux;
pub mod irq_i;
pub mod register;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
