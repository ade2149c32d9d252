use crate::config::{DR_REG_GPIO_BASE, GPIO_BANK_WIDTH};
use crate::sdk::common::bit::{mask_get, mask_set};
use crate::{BIT, BIT_RNG};
use bitflags::bitflags;

/****************************************************
 gpio regs struct: begin  0x3ff44000
 *****************************************************/
pub const GPIO_OUT_REG: u32 = 0x04;
pub const GPIO_OUT_W1TS_REG: u32 = 0x08;
pub const GPIO_OUT_W1TC_REG: u32 = 0x0c;
pub const GPIO_OUT1_REG: u32 = 0x10;
pub const GPIO_OUT1_W1TS_REG: u32 = 0x14;
pub const GPIO_OUT1_W1TC_REG: u32 = 0x18;
pub const GPIO_ENABLE_REG: u32 = 0x20;
pub const GPIO_ENABLE_W1TS_REG: u32 = 0x24;
pub const GPIO_ENABLE_W1TC_REG: u32 = 0x28;
pub const GPIO_ENABLE1_REG: u32 = 0x2c;
pub const GPIO_ENABLE1_W1TS_REG: u32 = 0x30;
pub const GPIO_ENABLE1_W1TC_REG: u32 = 0x34;
pub const GPIO_IN_REG: u32 = 0x3c;
pub const GPIO_IN1_REG: u32 = 0x40;
// GPIO_PINn_REG = 0x88 + 4 * n
pub const GPIO_PIN0_REG: u32 = 0x88;

// GPIO_PINn_REG fields
pub const GPIO_PIN_PAD_DRIVER: u32 = BIT!(2);
pub const GPIO_PIN_INT_TYPE: u32 = BIT_RNG!(7, 9);
pub const GPIO_PIN_WAKEUP_ENABLE: u32 = BIT!(10);
pub const GPIO_PIN_INT_ENA: u32 = BIT_RNG!(13, 17);

// IO_MUX_x_REG fields
pub const FUN_WPD: u32 = BIT!(7);
pub const FUN_WPU: u32 = BIT!(8);
pub const FUN_IE: u32 = BIT!(9);
pub const MCU_SEL: u32 = BIT_RNG!(12, 14);

bitflags! {
    /// Interrupt enable field of a `GPIO_PINn_REG`, one bit per destination.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IntEnable: u32 {
        const APP_CPU = BIT!(0);
        const APP_CPU_NMI = BIT!(1);
        const PRO_CPU = BIT!(2);
        const PRO_CPU_NMI = BIT!(3);
        const SDIO_EXT = BIT!(4);
    }
}

/// A 32-bit register of the GPIO peripheral, or an IO_MUX register by address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Out,
    OutW1ts,
    OutW1tc,
    Out1,
    Out1W1ts,
    Out1W1tc,
    Enable,
    EnableW1ts,
    EnableW1tc,
    Enable1,
    Enable1W1ts,
    Enable1W1tc,
    In,
    In1,
    /// `GPIO_PINn_REG` for pin `n`.
    Pin(u32),
    /// IO_MUX register at the given absolute address (see [`io_mux`](super::io_mux)).
    IoMux(u32),
}

impl Reg {
    pub const fn addr(self) -> u32 {
        let offset = match self {
            Reg::Out => GPIO_OUT_REG,
            Reg::OutW1ts => GPIO_OUT_W1TS_REG,
            Reg::OutW1tc => GPIO_OUT_W1TC_REG,
            Reg::Out1 => GPIO_OUT1_REG,
            Reg::Out1W1ts => GPIO_OUT1_W1TS_REG,
            Reg::Out1W1tc => GPIO_OUT1_W1TC_REG,
            Reg::Enable => GPIO_ENABLE_REG,
            Reg::EnableW1ts => GPIO_ENABLE_W1TS_REG,
            Reg::EnableW1tc => GPIO_ENABLE_W1TC_REG,
            Reg::Enable1 => GPIO_ENABLE1_REG,
            Reg::Enable1W1ts => GPIO_ENABLE1_W1TS_REG,
            Reg::Enable1W1tc => GPIO_ENABLE1_W1TC_REG,
            Reg::In => GPIO_IN_REG,
            Reg::In1 => GPIO_IN1_REG,
            Reg::Pin(n) => GPIO_PIN0_REG + (n << 2),
            Reg::IoMux(addr) => return addr,
        };
        DR_REG_GPIO_BASE + offset
    }
}

/// Bit-level access to the GPIO register file.
///
/// Every call is an immediate access; implementations keep no shadow state.
/// [`Mmio`] talks to the silicon, `SimRegisters` models it on the host.
pub trait GpioRegisters {
    fn read(&self, reg: Reg) -> u32;

    fn write(&mut self, reg: Reg, value: u32);

    /// Read-modify-write of a whole register.
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: Reg, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    fn set_bits(&mut self, reg: Reg, mask: u32) {
        self.modify(reg, |v| v | mask);
    }

    fn clear_bits(&mut self, reg: Reg, mask: u32) {
        self.modify(reg, |v| v & !mask);
    }
}

#[cfg_attr(test, mry::mry)]
pub fn read_reg32(addr: u32) -> u32 {
    unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
}

#[cfg_attr(test, mry::mry)]
pub fn write_reg32(addr: u32, value: u32) {
    unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
}

/// Memory-mapped register file of the running chip.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// The GPIO and IO_MUX peripherals must be mapped at their datasheet addresses.
    /// Several handles may coexist; callers arbitrate concurrent mutation themselves.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl GpioRegisters for Mmio {
    fn read(&self, reg: Reg) -> u32 {
        read_reg32(reg.addr())
    }

    fn write(&mut self, reg: Reg, value: u32) {
        write_reg32(reg.addr(), value)
    }
}

/// Register bank holding a pin's output, enable and input bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    /// Pins 0..=31
    Low,
    /// Pins 32..=39
    High,
}

impl Bank {
    pub const fn out(self) -> Reg {
        match self {
            Bank::Low => Reg::Out,
            Bank::High => Reg::Out1,
        }
    }

    pub const fn out_w1ts(self) -> Reg {
        match self {
            Bank::Low => Reg::OutW1ts,
            Bank::High => Reg::Out1W1ts,
        }
    }

    pub const fn out_w1tc(self) -> Reg {
        match self {
            Bank::Low => Reg::OutW1tc,
            Bank::High => Reg::Out1W1tc,
        }
    }

    pub const fn enable(self) -> Reg {
        match self {
            Bank::Low => Reg::Enable,
            Bank::High => Reg::Enable1,
        }
    }

    pub const fn enable_w1ts(self) -> Reg {
        match self {
            Bank::Low => Reg::EnableW1ts,
            Bank::High => Reg::Enable1W1ts,
        }
    }

    pub const fn enable_w1tc(self) -> Reg {
        match self {
            Bank::Low => Reg::EnableW1tc,
            Bank::High => Reg::Enable1W1tc,
        }
    }

    pub const fn input(self) -> Reg {
        match self {
            Bank::Low => Reg::In,
            Bank::High => Reg::In1,
        }
    }
}

/// Position of one pin inside its bank.
///
/// `pin` must be below 64; callers validate against the pin count first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankBit {
    pub bank: Bank,
    pub mask: u32,
}

impl BankBit {
    pub const fn of(pin: u32) -> Self {
        if pin < GPIO_BANK_WIDTH {
            Self { bank: Bank::Low, mask: BIT!(pin) }
        } else {
            Self { bank: Bank::High, mask: BIT!(pin - GPIO_BANK_WIDTH) }
        }
    }
}

macro_rules! reg_field {
    ( $name:ident, $mask:expr ) => {
        paste::paste! {
            pub const fn $name(self) -> u32 {
                mask_get($mask, self.0)
            }

            pub const fn [<with_ $name>](self, value: u32) -> Self {
                Self(mask_set(self.0, $mask, value))
            }
        }
    };
}

macro_rules! reg_flag {
    ( $name:ident, $mask:expr ) => {
        paste::paste! {
            pub const fn $name(self) -> bool {
                self.0 & $mask != 0
            }

            pub const fn [<with_ $name>](self, on: bool) -> Self {
                if on {
                    Self(self.0 | $mask)
                } else {
                    Self(self.0 & !$mask)
                }
            }
        }
    };
}

/// Typed view of a `GPIO_PINn_REG` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpioPinReg(pub u32);

impl GpioPinReg {
    reg_flag!(pad_driver, GPIO_PIN_PAD_DRIVER);
    reg_field!(int_type, GPIO_PIN_INT_TYPE);
    reg_flag!(wakeup_enable, GPIO_PIN_WAKEUP_ENABLE);
    reg_field!(int_ena_bits, GPIO_PIN_INT_ENA);

    pub const fn int_ena(self) -> IntEnable {
        IntEnable::from_bits_truncate(self.int_ena_bits())
    }

    pub const fn with_int_ena(self, ena: IntEnable) -> Self {
        self.with_int_ena_bits(ena.bits())
    }
}

/// Typed view of an IO_MUX register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IoMuxReg(pub u32);

impl IoMuxReg {
    reg_flag!(pull_down, FUN_WPD);
    reg_flag!(pull_up, FUN_WPU);
    reg_flag!(input_enable, FUN_IE);
    reg_field!(mcu_sel, MCU_SEL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mry::Any;

    #[test]
    fn test_bank_bit_low() {
        let bit = BankBit::of(2);
        assert_eq!(bit, BankBit { bank: Bank::Low, mask: 0x4 });
        assert_eq!(bit.bank.out_w1ts(), Reg::OutW1ts);
    }

    /// Pin 31 and pin 32 sit at the top of the low bank and the bottom of the high bank.
    #[test]
    fn test_bank_bit_boundary() {
        assert_eq!(BankBit::of(31), BankBit { bank: Bank::Low, mask: 0x8000_0000 });
        assert_eq!(BankBit::of(32), BankBit { bank: Bank::High, mask: 0x1 });
        assert_eq!(BankBit::of(39), BankBit { bank: Bank::High, mask: 0x80 });
        assert_eq!(BankBit::of(33).bank.enable_w1tc(), Reg::Enable1W1tc);
        assert_eq!(BankBit::of(33).bank.input(), Reg::In1);
    }

    #[test]
    fn test_reg_addr() {
        assert_eq!(Reg::OutW1ts.addr(), 0x3ff4_4008);
        assert_eq!(Reg::Enable1W1tc.addr(), 0x3ff4_4034);
        assert_eq!(Reg::In1.addr(), 0x3ff4_4040);
        assert_eq!(Reg::Pin(0).addr(), 0x3ff4_4088);
        assert_eq!(Reg::Pin(39).addr(), 0x3ff4_4124);
        assert_eq!(Reg::IoMux(0x3ff4_9044).addr(), 0x3ff4_9044);
    }

    #[test]
    fn test_gpio_pin_reg_fields() {
        let reg = GpioPinReg(0)
            .with_int_type(5)
            .with_wakeup_enable(true)
            .with_int_ena(IntEnable::PRO_CPU);

        assert_eq!(reg.0, (5 << 7) | BIT!(10) | (BIT!(2) << 13));
        assert_eq!(reg.int_type(), 5);
        assert!(reg.wakeup_enable());
        assert!(!reg.pad_driver());
        assert_eq!(reg.int_ena(), IntEnable::PRO_CPU);
    }

    #[test]
    fn test_io_mux_reg_fields() {
        let reg = IoMuxReg(0).with_pull_up(true).with_input_enable(true).with_mcu_sel(2);
        assert_eq!(reg.0, BIT!(8) | BIT!(9) | (2 << 12));

        let reg = reg.with_pull_up(false);
        assert!(!reg.pull_up());
        assert!(!reg.pull_down());
        assert!(reg.input_enable());
        assert_eq!(reg.mcu_sel(), 2);
    }

    /// Tests that the memory-mapped handle writes to the absolute register address.
    #[test]
    #[mry::lock(write_reg32)]
    fn test_mmio_write_uses_absolute_address() {
        mock_write_reg32(Any, Any).returns(());

        let mut regs = unsafe { Mmio::steal() };
        regs.write(Reg::Out1W1ts, 0x2);

        mock_write_reg32(0x3ff4_4014, 0x2).assert_called(1);
    }

    /// Tests that read-modify-write goes through one read and one write of the same register.
    #[test]
    #[mry::lock(read_reg32, write_reg32)]
    fn test_mmio_set_bits() {
        mock_read_reg32(0x3ff4_40a0).returns(0x4);
        mock_write_reg32(Any, Any).returns(());

        let mut regs = unsafe { Mmio::steal() };
        regs.set_bits(Reg::Pin(6), GPIO_PIN_WAKEUP_ENABLE);

        mock_write_reg32(0x3ff4_40a0, 0x404).assert_called(1);
    }
}
