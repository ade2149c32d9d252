use crate::config::{ETS_GPIO_INTR_SOURCE, GPIO_TAG, XT_INT_COUNT};
use crate::sdk::error::{gpio_check, GpioError, Result};
use crate::sdk::mcu::gpio::CoreId;
use crate::BIT;
use core::ffi::c_void;
use log::{debug, error};

/// Interrupt service routine, called with the argument given at registration.
pub type IsrHandler = extern "C" fn(*mut c_void);

/// Opaque argument handed to the [`IsrHandler`] on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsrArg(pub *mut c_void);

// The pointer is only passed through to the handler, never dereferenced here.
unsafe impl Send for IsrArg {}
unsafe impl Sync for IsrArg {}

impl IsrArg {
    pub const fn null() -> Self {
        Self(core::ptr::null_mut())
    }
}

#[cfg(target_arch = "xtensa")]
mod rom {
    use super::IsrHandler;
    use core::ffi::c_void;

    extern "C" {
        pub fn intr_matrix_set(cpu_no: i32, model_num: u32, intr_num: u32);
        pub fn xt_ints_on(mask: u32);
        pub fn xt_ints_off(mask: u32);
        pub fn xt_set_interrupt_handler(n: i32, f: IsrHandler, arg: *mut c_void) -> *mut c_void;
    }
}

/// Routes peripheral interrupt `source` to CPU interrupt `vector` of core `cpu`.
#[cfg_attr(test, mry::mry)]
pub fn intr_matrix_set(cpu: u32, source: u32, vector: u32) {
    #[cfg(target_arch = "xtensa")]
    unsafe {
        rom::intr_matrix_set(cpu as i32, source, vector);
    }
    #[cfg(not(target_arch = "xtensa"))]
    log::trace!(target: GPIO_TAG, "intr_matrix_set cpu={} source={} vector={}", cpu, source, vector);
}

/// Masks the CPU interrupt vectors in `mask` on the calling core.
#[cfg_attr(test, mry::mry)]
pub fn xt_ints_off(mask: u32) {
    #[cfg(target_arch = "xtensa")]
    unsafe {
        rom::xt_ints_off(mask);
    }
    #[cfg(not(target_arch = "xtensa"))]
    log::trace!(target: GPIO_TAG, "xt_ints_off mask={:#x}", mask);
}

/// Unmasks the CPU interrupt vectors in `mask` on the calling core.
#[cfg_attr(test, mry::mry)]
pub fn xt_ints_on(mask: u32) {
    #[cfg(target_arch = "xtensa")]
    unsafe {
        rom::xt_ints_on(mask);
    }
    #[cfg(not(target_arch = "xtensa"))]
    log::trace!(target: GPIO_TAG, "xt_ints_on mask={:#x}", mask);
}

/// Installs `handler` in the vector table of the calling core.
#[cfg_attr(test, mry::mry)]
pub fn xt_set_interrupt_handler(vector: u32, handler: IsrHandler, arg: IsrArg) {
    #[cfg(target_arch = "xtensa")]
    unsafe {
        rom::xt_set_interrupt_handler(vector as i32, handler, arg.0);
    }
    #[cfg(not(target_arch = "xtensa"))]
    log::trace!(
        target: GPIO_TAG,
        "xt_set_interrupt_handler vector={} handler={:#x} arg={:?}",
        vector,
        handler as usize,
        arg.0
    );
}

/// Binds the GPIO peripheral interrupt to a CPU vector and installs its handler.
///
/// All pins share the one GPIO interrupt source; the handler is expected to read
/// the interrupt status itself. Calling again with another handler replaces the
/// previous binding.
///
/// # Parameters
///
/// * `vector` - CPU interrupt vector (0-31)
/// * `handler` - Routine to install, `None` is rejected
/// * `arg` - Passed to `handler` on every call
/// * `core` - Core whose interrupt matrix entry is routed; should be the calling
///   core, since vector masking and the handler table are per core
///
/// # Algorithm
///
/// 1. Reject an out-of-range vector or a missing handler
/// 2. Mask the vector
/// 3. Route `ETS_GPIO_INTR_SOURCE` to the vector on `core`
/// 4. Install handler and argument
/// 5. Unmask the vector
pub fn register_handler(vector: u32, handler: Option<IsrHandler>, arg: IsrArg, core: CoreId) -> Result<()> {
    gpio_check!(vector < XT_INT_COUNT, "GPIO isr vector error, vector={}", vector);
    let Some(handler) = handler else {
        error!(target: GPIO_TAG, "GPIO isr handler error, handler=NULL");
        return Err(GpioError::InvalidArgument);
    };

    let mask = BIT!(vector);
    xt_ints_off(mask);
    intr_matrix_set(core.cpu_num(), ETS_GPIO_INTR_SOURCE, vector);
    xt_set_interrupt_handler(vector, handler, arg);
    xt_ints_on(mask);

    debug!(target: GPIO_TAG, "GPIO isr bound to vector {} on {:?} core", vector, core);
    Ok(())
}
