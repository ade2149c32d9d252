use crate::config::{DR_REG_IO_MUX_BASE, GPIO_PIN_COUNT};

pub const PERIPHS_IO_MUX_GPIO36_U: u32 = DR_REG_IO_MUX_BASE + 0x04;
pub const PERIPHS_IO_MUX_GPIO37_U: u32 = DR_REG_IO_MUX_BASE + 0x08;
pub const PERIPHS_IO_MUX_GPIO38_U: u32 = DR_REG_IO_MUX_BASE + 0x0c;
pub const PERIPHS_IO_MUX_GPIO39_U: u32 = DR_REG_IO_MUX_BASE + 0x10;
pub const PERIPHS_IO_MUX_GPIO34_U: u32 = DR_REG_IO_MUX_BASE + 0x14;
pub const PERIPHS_IO_MUX_GPIO35_U: u32 = DR_REG_IO_MUX_BASE + 0x18;
pub const PERIPHS_IO_MUX_GPIO32_U: u32 = DR_REG_IO_MUX_BASE + 0x1c;
pub const PERIPHS_IO_MUX_GPIO33_U: u32 = DR_REG_IO_MUX_BASE + 0x20;
pub const PERIPHS_IO_MUX_GPIO25_U: u32 = DR_REG_IO_MUX_BASE + 0x24;
pub const PERIPHS_IO_MUX_GPIO26_U: u32 = DR_REG_IO_MUX_BASE + 0x28;
pub const PERIPHS_IO_MUX_GPIO27_U: u32 = DR_REG_IO_MUX_BASE + 0x2c;
pub const PERIPHS_IO_MUX_MTMS_U: u32 = DR_REG_IO_MUX_BASE + 0x30;
pub const PERIPHS_IO_MUX_MTDI_U: u32 = DR_REG_IO_MUX_BASE + 0x34;
pub const PERIPHS_IO_MUX_MTCK_U: u32 = DR_REG_IO_MUX_BASE + 0x38;
pub const PERIPHS_IO_MUX_MTDO_U: u32 = DR_REG_IO_MUX_BASE + 0x3c;
pub const PERIPHS_IO_MUX_GPIO2_U: u32 = DR_REG_IO_MUX_BASE + 0x40;
pub const PERIPHS_IO_MUX_GPIO0_U: u32 = DR_REG_IO_MUX_BASE + 0x44;
pub const PERIPHS_IO_MUX_GPIO4_U: u32 = DR_REG_IO_MUX_BASE + 0x48;
pub const PERIPHS_IO_MUX_GPIO16_U: u32 = DR_REG_IO_MUX_BASE + 0x4c;
pub const PERIPHS_IO_MUX_GPIO17_U: u32 = DR_REG_IO_MUX_BASE + 0x50;
pub const PERIPHS_IO_MUX_SD_DATA2_U: u32 = DR_REG_IO_MUX_BASE + 0x54;
pub const PERIPHS_IO_MUX_SD_DATA3_U: u32 = DR_REG_IO_MUX_BASE + 0x58;
pub const PERIPHS_IO_MUX_SD_CMD_U: u32 = DR_REG_IO_MUX_BASE + 0x5c;
pub const PERIPHS_IO_MUX_SD_CLK_U: u32 = DR_REG_IO_MUX_BASE + 0x60;
pub const PERIPHS_IO_MUX_SD_DATA0_U: u32 = DR_REG_IO_MUX_BASE + 0x64;
pub const PERIPHS_IO_MUX_SD_DATA1_U: u32 = DR_REG_IO_MUX_BASE + 0x68;
pub const PERIPHS_IO_MUX_GPIO5_U: u32 = DR_REG_IO_MUX_BASE + 0x6c;
pub const PERIPHS_IO_MUX_GPIO18_U: u32 = DR_REG_IO_MUX_BASE + 0x70;
pub const PERIPHS_IO_MUX_GPIO19_U: u32 = DR_REG_IO_MUX_BASE + 0x74;
pub const PERIPHS_IO_MUX_GPIO21_U: u32 = DR_REG_IO_MUX_BASE + 0x7c;
pub const PERIPHS_IO_MUX_GPIO22_U: u32 = DR_REG_IO_MUX_BASE + 0x80;
pub const PERIPHS_IO_MUX_U0RXD_U: u32 = DR_REG_IO_MUX_BASE + 0x84;
pub const PERIPHS_IO_MUX_U0TXD_U: u32 = DR_REG_IO_MUX_BASE + 0x88;
pub const PERIPHS_IO_MUX_GPIO23_U: u32 = DR_REG_IO_MUX_BASE + 0x8c;

/// IO_MUX register of every pin index, `0` where the index has no pad.
///
/// Indices 20, 24 and 28..=31 are not bonded out.
pub static GPIO_PIN_MUX_REG: [u32; GPIO_PIN_COUNT as usize] = [
    PERIPHS_IO_MUX_GPIO0_U,    // 0
    PERIPHS_IO_MUX_U0TXD_U,    // 1
    PERIPHS_IO_MUX_GPIO2_U,    // 2
    PERIPHS_IO_MUX_U0RXD_U,    // 3
    PERIPHS_IO_MUX_GPIO4_U,    // 4
    PERIPHS_IO_MUX_GPIO5_U,    // 5
    PERIPHS_IO_MUX_SD_CLK_U,   // 6
    PERIPHS_IO_MUX_SD_DATA0_U, // 7
    PERIPHS_IO_MUX_SD_DATA1_U, // 8
    PERIPHS_IO_MUX_SD_DATA2_U, // 9
    PERIPHS_IO_MUX_SD_DATA3_U, // 10
    PERIPHS_IO_MUX_SD_CMD_U,   // 11
    PERIPHS_IO_MUX_MTDI_U,     // 12
    PERIPHS_IO_MUX_MTCK_U,     // 13
    PERIPHS_IO_MUX_MTMS_U,     // 14
    PERIPHS_IO_MUX_MTDO_U,     // 15
    PERIPHS_IO_MUX_GPIO16_U,   // 16
    PERIPHS_IO_MUX_GPIO17_U,   // 17
    PERIPHS_IO_MUX_GPIO18_U,   // 18
    PERIPHS_IO_MUX_GPIO19_U,   // 19
    0,                         // 20
    PERIPHS_IO_MUX_GPIO21_U,   // 21
    PERIPHS_IO_MUX_GPIO22_U,   // 22
    PERIPHS_IO_MUX_GPIO23_U,   // 23
    0,                         // 24
    PERIPHS_IO_MUX_GPIO25_U,   // 25
    PERIPHS_IO_MUX_GPIO26_U,   // 26
    PERIPHS_IO_MUX_GPIO27_U,   // 27
    0,                         // 28
    0,                         // 29
    0,                         // 30
    0,                         // 31
    PERIPHS_IO_MUX_GPIO32_U,   // 32
    PERIPHS_IO_MUX_GPIO33_U,   // 33
    PERIPHS_IO_MUX_GPIO34_U,   // 34
    PERIPHS_IO_MUX_GPIO35_U,   // 35
    PERIPHS_IO_MUX_GPIO36_U,   // 36
    PERIPHS_IO_MUX_GPIO37_U,   // 37
    PERIPHS_IO_MUX_GPIO38_U,   // 38
    PERIPHS_IO_MUX_GPIO39_U,   // 39
];

/// Looks up the IO_MUX register of a pin.
///
/// Returns `None` for reserved indices and for anything past the pin count.
pub fn register_for(pin: u32) -> Option<u32> {
    match GPIO_PIN_MUX_REG.get(pin as usize) {
        Some(&addr) if addr != 0 => Some(addr),
        _ => None,
    }
}
