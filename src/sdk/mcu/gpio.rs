use crate::config::{GPIO_INPUT_ONLY_FIRST, GPIO_PIN_COUNT, GPIO_TAG, PIN_FUNC_GPIO};
use crate::sdk::error::{gpio_check, GpioError, Result};
use crate::sdk::mcu::io_mux::register_for;
use crate::sdk::common::bit::mask_get;
use crate::sdk::mcu::register::{BankBit, GpioPinReg, GpioRegisters, IntEnable, IoMuxReg, Reg, MCU_SEL};
use crate::{BIT, BIT_MASK_LEN};
use bitflags::bitflags;
use log::{error, info, warn};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Pins that exist in the bitmask space but cannot drive an output (GPIO34..GPIO39).
pub const GPIO_INPUT_ONLY_MASK: u64 = BIT_MASK_LEN!(GPIO_PIN_COUNT as u64) & !BIT_MASK_LEN!(GPIO_INPUT_ONLY_FIRST as u64);

/// Highest IO_MUX function number the `MCU_SEL` field can hold.
pub const MCU_SEL_MAX: u32 = mask_get(MCU_SEL, MCU_SEL);

bitflags! {
    /// Direction and drive of a pin.
    ///
    /// `OPEN_DRAIN` is stored independently of `OUTPUT` and only has an effect on
    /// the pad while the output driver is enabled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GpioMode: u32 {
        const INPUT = BIT!(0);
        const OUTPUT = BIT!(1);
        const OPEN_DRAIN = BIT!(2);

        const OUTPUT_OD = Self::OUTPUT.bits() | Self::OPEN_DRAIN.bits();
        const INPUT_OUTPUT = Self::INPUT.bits() | Self::OUTPUT.bits();
        const INPUT_OUTPUT_OD = Self::INPUT.bits() | Self::OUTPUT.bits() | Self::OPEN_DRAIN.bits();
    }
}

impl GpioMode {
    pub const DISABLE: GpioMode = GpioMode::empty();
}

/// Pull resistor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum PullMode {
    PullUpOnly = 0,
    PullDownOnly = 1,
    PullUpPullDown = 2,
    Floating = 3,
}

impl PullMode {
    /// Decodes a raw pull mode, rejecting values outside the enumeration.
    pub fn from_raw(raw: u32) -> Result<Self> {
        FromPrimitive::from_u32(raw).ok_or_else(|| {
            error!(target: GPIO_TAG, "GPIO pull mode error, pull={}", raw);
            GpioError::InvalidArgument
        })
    }

    /// `(pull_up, pull_down)` enable bits for this mode.
    pub const fn bits(self) -> (bool, bool) {
        match self {
            PullMode::PullUpOnly => (true, false),
            PullMode::PullDownOnly => (false, true),
            PullMode::PullUpPullDown => (true, true),
            PullMode::Floating => (false, false),
        }
    }
}

/// Interrupt trigger of a pin. The discriminant is the hardware field encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum InterruptType {
    Disable = 0,
    PosEdge = 1,
    NegEdge = 2,
    AnyEdge = 3,
    LowLevel = 4,
    HighLevel = 5,
}

impl InterruptType {
    /// Decodes a raw interrupt type, rejecting values outside the enumeration.
    pub fn from_raw(raw: u32) -> Result<Self> {
        FromPrimitive::from_u32(raw).ok_or_else(|| {
            error!(target: GPIO_TAG, "GPIO interrupt type error, intr_type={}", raw);
            GpioError::InvalidArgument
        })
    }

    /// Level triggers are the only ones that work without a running clock, and so
    /// the only ones usable for wake-up.
    pub const fn is_level(self) -> bool {
        matches!(self, InterruptType::LowLevel | InterruptType::HighLevel)
    }
}

/// CPU core of the dual-core chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum CoreId {
    /// Protocol CPU, core 0
    Pro = 0,
    /// Application CPU, core 1
    App = 1,
}

impl CoreId {
    pub const fn cpu_num(self) -> u32 {
        self as u32
    }

    /// Maskable interrupt enable bit of this core in a `GPIO_PINn_REG`.
    pub const fn int_enable(self) -> IntEnable {
        match self {
            CoreId::Pro => IntEnable::PRO_CPU,
            CoreId::App => IntEnable::APP_CPU,
        }
    }
}

/// Configuration applied identically to every pin selected in `pin_bit_mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    /// One bit per pin index
    pub pin_bit_mask: u64,
    pub mode: GpioMode,
    pub pull: PullMode,
    pub intr_type: InterruptType,
}

impl GpioConfig {
    /// Floating, disabled, interrupt-less pins.
    pub const fn new(pin_bit_mask: u64) -> Self {
        Self {
            pin_bit_mask,
            mode: GpioMode::DISABLE,
            pull: PullMode::Floating,
            intr_type: InterruptType::Disable,
        }
    }

    pub const fn mode(mut self, mode: GpioMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn pull(mut self, pull: PullMode) -> Self {
        self.pull = pull;
        self
    }

    pub const fn intr_type(mut self, intr_type: InterruptType) -> Self {
        self.intr_type = intr_type;
        self
    }
}

/// Builds a pin bitmask from a list of pin indices.
pub fn pin_mask(pins: &[u32]) -> Result<u64> {
    let mut mask = 0u64;
    for &pin in pins {
        gpio_check!(pin < GPIO_PIN_COUNT, "GPIO number error, gpio_num={}", pin);
        mask |= BIT!(pin as u64);
    }
    Ok(mask)
}

/// `true` for pins that have a pad, i.e. an IO_MUX register.
pub fn is_valid_gpio(pin: u32) -> bool {
    register_for(pin).is_some()
}

/// `true` for pins that have a pad and an output driver.
pub fn is_valid_output_gpio(pin: u32) -> bool {
    is_valid_gpio(pin) && pin < GPIO_INPUT_ONLY_FIRST
}

/// GPIO controller over a register file.
///
/// Every operation validates its arguments before the first register write, so an
/// `Err` never leaves a partially applied change behind. Operations are not
/// synchronized: two handles over the same hardware, or an interrupt handler that
/// reconfigures a pin, can interleave with a multi-register sequence.
pub struct Gpio<R: GpioRegisters> {
    regs: R,
}

impl<R: GpioRegisters> Gpio<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    pub fn release(self) -> R {
        self.regs
    }

    /// Current value of the pin's `GPIO_PINn_REG`, `None` for reserved pins.
    pub fn pin_reg(&self, pin: u32) -> Option<GpioPinReg> {
        if !is_valid_gpio(pin) {
            return None;
        }
        Some(GpioPinReg(self.regs.read(Reg::Pin(pin))))
    }

    /// Current value of the pin's IO_MUX register, `None` for reserved pins.
    pub fn io_mux_reg(&self, pin: u32) -> Option<IoMuxReg> {
        register_for(pin).map(|addr| IoMuxReg(self.regs.read(Reg::IoMux(addr))))
    }

    /// Whether the output driver of the pin is enabled.
    pub fn is_output_enabled(&self, pin: u32) -> bool {
        if pin >= GPIO_PIN_COUNT {
            return false;
        }
        let bit = BankBit::of(pin);
        self.regs.read(bit.bank.enable()) & bit.mask != 0
    }

    fn modify_pin<F: FnOnce(GpioPinReg) -> GpioPinReg>(&mut self, pin: u32, f: F) {
        self.regs.modify(Reg::Pin(pin), |v| f(GpioPinReg(v)).0);
    }

    fn modify_io_mux<F: FnOnce(IoMuxReg) -> IoMuxReg>(&mut self, pin: u32, f: F) {
        if let Some(addr) = register_for(pin) {
            self.regs.modify(Reg::IoMux(addr), |v| f(IoMuxReg(v)).0);
        }
    }

    fn write_output_enable(&mut self, pin: u32, enable: bool) {
        let bit = BankBit::of(pin);
        let reg = if enable { bit.bank.enable_w1ts() } else { bit.bank.enable_w1tc() };
        self.regs.write(reg, bit.mask);
    }

    fn write_pull(&mut self, pin: u32, pull: PullMode) {
        let (up, down) = pull.bits();
        self.modify_io_mux(pin, |r| r.with_pull_up(up).with_pull_down(down));
    }

    fn write_int_enable(&mut self, pin: u32, core: CoreId, enable: bool) {
        self.modify_pin(pin, |r| {
            let ena = if enable {
                r.int_ena() | core.int_enable()
            } else {
                r.int_ena() - core.int_enable()
            };
            r.with_int_ena(ena)
        });
    }

    /// Sets the interrupt trigger of a pin.
    ///
    /// Only the trigger field is written; the per-core enable bits are left as they
    /// are.
    ///
    /// # Parameters
    ///
    /// * `pin` - Pin index (0-39, excluding reserved indices)
    /// * `intr_type` - Trigger to program
    pub fn set_interrupt_type(&mut self, pin: u32, intr_type: InterruptType) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.modify_pin(pin, |r| r.with_int_type(intr_type as u32));
        Ok(())
    }

    /// [`set_interrupt_type`](Self::set_interrupt_type) for a raw trigger value.
    pub fn set_interrupt_type_raw(&mut self, pin: u32, intr_type: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        let intr_type = InterruptType::from_raw(intr_type)?;
        self.set_interrupt_type(pin, intr_type)
    }

    /// Enables the pin interrupt towards `core`.
    ///
    /// Each core has its own enable bit; the other core's bit is not touched.
    pub fn enable_interrupt(&mut self, pin: u32, core: CoreId) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.write_int_enable(pin, core, true);
        Ok(())
    }

    /// Disables the pin interrupt towards `core`.
    pub fn disable_interrupt(&mut self, pin: u32, core: CoreId) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.write_int_enable(pin, core, false);
        Ok(())
    }

    pub fn enable_output(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_output_gpio(pin), "GPIO output gpio_num error, gpio_num={}", pin);
        self.write_output_enable(pin, true);
        Ok(())
    }

    pub fn disable_output(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.write_output_enable(pin, false);
        Ok(())
    }

    /// Configures direction and drive of a single pin.
    ///
    /// # Parameters
    ///
    /// * `pin` - Pin index (0-39, excluding reserved indices)
    /// * `mode` - Combination of `INPUT`, `OUTPUT` and `OPEN_DRAIN`
    ///
    /// # Algorithm
    ///
    /// 1. Reject invalid pins, and output modes on input-only pins
    /// 2. Set or clear the IO_MUX input enable bit
    /// 3. Set or clear the output enable bit through the W1TS/W1TC alias of the pin's bank
    /// 4. Set or clear the pad driver (open-drain) bit
    ///
    /// # Notes
    ///
    /// * Steps 2-4 are independent single-register writes; there is nothing to roll back
    pub fn set_direction(&mut self, pin: u32, mode: GpioMode) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        gpio_check!(
            !mode.contains(GpioMode::OUTPUT) || is_valid_output_gpio(pin),
            "io_num={} can only be input",
            pin
        );

        self.modify_io_mux(pin, |r| r.with_input_enable(mode.contains(GpioMode::INPUT)));
        self.write_output_enable(pin, mode.contains(GpioMode::OUTPUT));
        self.modify_pin(pin, |r| r.with_pad_driver(mode.contains(GpioMode::OPEN_DRAIN)));
        Ok(())
    }

    /// Drives the output level of a pin.
    ///
    /// The level is latched even while the output driver is disabled and shows on
    /// the pad once it is enabled.
    pub fn set_level(&mut self, pin: u32, level: bool) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        let bit = BankBit::of(pin);
        let reg = if level { bit.bank.out_w1ts() } else { bit.bank.out_w1tc() };
        self.regs.write(reg, bit.mask);
        Ok(())
    }

    /// Reads the input level of a pin.
    ///
    /// Reserved indices are not validated and read whatever the input bank holds at
    /// their bit. Indices past the pin count read low without touching hardware.
    pub fn get_level(&self, pin: u32) -> bool {
        if pin >= GPIO_PIN_COUNT {
            return false;
        }
        let bit = BankBit::of(pin);
        self.regs.read(bit.bank.input()) & bit.mask != 0
    }

    /// Sets both pull resistor enables of a pin.
    pub fn set_pull_mode(&mut self, pin: u32, pull: PullMode) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.write_pull(pin, pull);
        Ok(())
    }

    /// [`set_pull_mode`](Self::set_pull_mode) for a raw pull value.
    pub fn set_pull_mode_raw(&mut self, pin: u32, pull: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        let pull = PullMode::from_raw(pull)?;
        self.set_pull_mode(pin, pull)
    }

    pub fn pullup_enable(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.modify_io_mux(pin, |r| r.with_pull_up(true));
        Ok(())
    }

    pub fn pullup_disable(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.modify_io_mux(pin, |r| r.with_pull_up(false));
        Ok(())
    }

    pub fn pulldown_enable(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.modify_io_mux(pin, |r| r.with_pull_down(true));
        Ok(())
    }

    pub fn pulldown_disable(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.modify_io_mux(pin, |r| r.with_pull_down(false));
        Ok(())
    }

    /// Routes a pad to IO_MUX function `func` (0-7). Function 2 is the GPIO matrix.
    pub fn set_function(&mut self, pin: u32, func: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        gpio_check!(func <= MCU_SEL_MAX, "GPIO function error, gpio_num={}, func={}", pin, func);
        self.modify_io_mux(pin, |r| r.with_mcu_sel(func));
        Ok(())
    }

    /// Applies one configuration to every pin selected in `cfg.pin_bit_mask`.
    ///
    /// # Parameters
    ///
    /// * `cfg` - Pin selection plus the mode, pull and interrupt trigger to apply
    /// * `core` - Core whose interrupt enable bit follows `cfg.intr_type`
    ///
    /// # Algorithm
    ///
    /// 1. Reject an empty mask or one with bits past the pin count
    /// 2. Reject output modes when the mask selects an input-only pin
    /// 3. Scan every pin index; for each selected pin with a pad, in order:
    ///    - input enable
    ///    - open-drain
    ///    - output enable
    ///    - pull-up and pull-down
    ///    - interrupt trigger, then interrupt enable on `core` (any trigger but
    ///      `Disable` enables)
    ///    - IO_MUX function select to GPIO, last
    /// 4. Selected indices without a pad are logged and skipped
    ///
    /// # Notes
    ///
    /// * Validation completes before the first write, so a rejected request changes nothing
    /// * A skipped index does not turn the result into an error
    pub fn configure(&mut self, cfg: &GpioConfig, core: CoreId) -> Result<()> {
        let mask = cfg.pin_bit_mask;
        gpio_check!(
            mask != 0 && mask < BIT!(GPIO_PIN_COUNT as u64),
            "GPIO_PIN mask error, mask={:#x}",
            mask
        );
        if cfg.mode.contains(GpioMode::OUTPUT) {
            gpio_check!(
                mask & GPIO_INPUT_ONLY_MASK == 0,
                "GPIO{}-{} can only be used as input mode",
                GPIO_INPUT_ONLY_FIRST,
                GPIO_PIN_COUNT - 1
            );
        }

        for pin in 0..GPIO_PIN_COUNT {
            if mask & BIT!(pin as u64) == 0 {
                continue;
            }
            if register_for(pin).is_none() {
                warn!(target: GPIO_TAG, "io_num={} does not exist", pin);
                continue;
            }
            self.apply_config(pin, cfg, core);
        }
        Ok(())
    }

    fn apply_config(&mut self, pin: u32, cfg: &GpioConfig, core: CoreId) {
        let mode = cfg.mode;
        let (up, down) = cfg.pull.bits();
        info!(
            target: GPIO_TAG,
            "Gpio{:02} |Mode:{}{}{}{}{} |Intr:{}",
            pin,
            if mode.contains(GpioMode::INPUT) { " INPUT" } else { "" },
            if mode.contains(GpioMode::OPEN_DRAIN) { " OD" } else { "" },
            if mode.contains(GpioMode::OUTPUT) { " OUTPUT" } else { "" },
            if up { " PU" } else { "" },
            if down { " PD" } else { "" },
            cfg.intr_type as u32
        );

        self.modify_io_mux(pin, |r| r.with_input_enable(mode.contains(GpioMode::INPUT)));
        self.modify_pin(pin, |r| r.with_pad_driver(mode.contains(GpioMode::OPEN_DRAIN)));
        self.write_output_enable(pin, mode.contains(GpioMode::OUTPUT));
        self.write_pull(pin, cfg.pull);
        self.modify_pin(pin, |r| r.with_int_type(cfg.intr_type as u32));
        self.write_int_enable(pin, core, cfg.intr_type != InterruptType::Disable);
        // the other fields only reach the pad once it is muxed to GPIO
        self.modify_io_mux(pin, |r| r.with_mcu_sel(PIN_FUNC_GPIO));
    }

    /// Enables wake-from-sleep on a level trigger.
    ///
    /// Edge triggers need a running clock to be detected and are rejected.
    pub fn wakeup_enable(&mut self, pin: u32, intr_type: InterruptType) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        gpio_check!(
            intr_type.is_level(),
            "GPIO wakeup only support Level mode, but edge mode set. gpio_num:{}",
            pin
        );
        self.modify_pin(pin, |r| r.with_int_type(intr_type as u32).with_wakeup_enable(true));
        Ok(())
    }

    pub fn wakeup_disable(&mut self, pin: u32) -> Result<()> {
        gpio_check!(is_valid_gpio(pin), "GPIO number error, gpio_num={}", pin);
        self.modify_pin(pin, |r| r.with_wakeup_enable(false));
        Ok(())
    }
}
