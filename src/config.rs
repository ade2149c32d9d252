// Chip topology. Everything below is fixed by the ESP32 silicon.

/// Number of pin indices, including the reserved ones.
pub const GPIO_PIN_COUNT: u32 = 40;

/// First input-only pin. GPIO34..GPIO39 have no output driver.
pub const GPIO_INPUT_ONLY_FIRST: u32 = 34;

/// Width of one output/enable/input bank register.
pub const GPIO_BANK_WIDTH: u32 = 32;

// Peripheral base addresses
pub const DR_REG_GPIO_BASE: u32 = 0x3ff4_4000;
pub const DR_REG_IO_MUX_BASE: u32 = 0x3ff4_9000;

/// Interrupt matrix source number of the GPIO peripheral.
pub const ETS_GPIO_INTR_SOURCE: u32 = 22;

/// Number of Xtensa CPU interrupt vectors.
pub const XT_INT_COUNT: u32 = 32;

/// IO_MUX function number that routes a pad to the GPIO matrix.
pub const PIN_FUNC_GPIO: u32 = 2;

/// Log target for every message emitted by this crate.
pub const GPIO_TAG: &str = "GPIO";
