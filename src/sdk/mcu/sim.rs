use crate::config::GPIO_PIN_COUNT;
use crate::sdk::mcu::register::{BankBit, Bank, GpioRegisters, Reg};
use heapless::FnvIndexMap;

// Bank registers + 40 GPIO_PINn + 34 IO_MUX registers fit comfortably.
const SIM_REG_CAPACITY: usize = 128;

/// Host-side model of the GPIO and IO_MUX register file.
///
/// Registers start at zero. The W1TS/W1TC aliases act on their target register,
/// and the input banks report the driven output level for output-enabled pins and
/// the externally applied level (see [`SimRegisters::drive_input`]) otherwise.
#[derive(Debug, Default)]
pub struct SimRegisters {
    regs: FnvIndexMap<u32, u32, SIM_REG_CAPACITY>,
    pads: [u32; 2],
    writes: usize,
}

impl SimRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an external level to a pad, as seen by the input bank.
    ///
    /// Indices past the pin count have no pad and are ignored.
    pub fn drive_input(&mut self, pin: u32, level: bool) {
        if pin >= GPIO_PIN_COUNT {
            return;
        }
        let bit = BankBit::of(pin);
        let pads = &mut self.pads[Self::bank_index(bit.bank)];
        if level {
            *pads |= bit.mask;
        } else {
            *pads &= !bit.mask;
        }
    }

    /// Number of register writes performed so far, aliases included.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn bank_index(bank: Bank) -> usize {
        match bank {
            Bank::Low => 0,
            Bank::High => 1,
        }
    }

    fn load(&self, reg: Reg) -> u32 {
        self.regs.get(&reg.addr()).copied().unwrap_or(0)
    }

    fn store(&mut self, reg: Reg, value: u32) {
        // The chip's register map fits; arbitrary `Pin(n)`/`IoMux(addr)` values may not.
        let stored = self.regs.insert(reg.addr(), value);
        debug_assert!(stored.is_ok(), "simulated register file full at {:#x}", reg.addr());
    }

    fn input(&self, bank: Bank) -> u32 {
        let out = self.load(bank.out());
        let enable = self.load(bank.enable());
        (out & enable) | (self.pads[Self::bank_index(bank)] & !enable)
    }
}

impl GpioRegisters for SimRegisters {
    fn read(&self, reg: Reg) -> u32 {
        match reg {
            Reg::In => self.input(Bank::Low),
            Reg::In1 => self.input(Bank::High),
            Reg::OutW1ts
            | Reg::OutW1tc
            | Reg::Out1W1ts
            | Reg::Out1W1tc
            | Reg::EnableW1ts
            | Reg::EnableW1tc
            | Reg::Enable1W1ts
            | Reg::Enable1W1tc => 0,
            _ => self.load(reg),
        }
    }

    fn write(&mut self, reg: Reg, value: u32) {
        self.writes += 1;
        match reg {
            Reg::OutW1ts => self.store(Reg::Out, self.load(Reg::Out) | value),
            Reg::OutW1tc => self.store(Reg::Out, self.load(Reg::Out) & !value),
            Reg::Out1W1ts => self.store(Reg::Out1, self.load(Reg::Out1) | value),
            Reg::Out1W1tc => self.store(Reg::Out1, self.load(Reg::Out1) & !value),
            Reg::EnableW1ts => self.store(Reg::Enable, self.load(Reg::Enable) | value),
            Reg::EnableW1tc => self.store(Reg::Enable, self.load(Reg::Enable) & !value),
            Reg::Enable1W1ts => self.store(Reg::Enable1, self.load(Reg::Enable1) | value),
            Reg::Enable1W1tc => self.store(Reg::Enable1, self.load(Reg::Enable1) & !value),
            // read-only
            Reg::In | Reg::In1 => {}
            _ => self.store(reg, value),
        }
    }
}
