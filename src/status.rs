//! # Processor Status Flags
//!
//! The seven 6502 status flags packed into a single byte.
//!
//! Bit layout (bit 7 → bit 0): `N V - B D I Z C`. Bit 5 is not backed by any
//! flag: it is dropped on unpack and always packs as 0.

use bitflags::bitflags;

bitflags! {
    /// Processor status register.
    ///
    /// | Bit | Mask | Name              |
    /// |-----|------|-------------------|
    /// | 7   | 0x80 | NEGATIVE          |
    /// | 6   | 0x40 | OVERFLOW          |
    /// | 5   | 0x20 | (unused, reads 0) |
    /// | 4   | 0x10 | BREAK             |
    /// | 3   | 0x08 | DECIMAL           |
    /// | 2   | 0x04 | INTERRUPT_DISABLE |
    /// | 1   | 0x02 | ZERO              |
    /// | 0   | 0x01 | CARRY             |
    ///
    /// ```
    /// use sim6502::StatusFlags;
    ///
    /// let mut flags = StatusFlags::empty();
    /// flags.set_register(0xFF);
    /// assert_eq!(flags.register(), 0b1101_1111);
    /// ```
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

impl StatusFlags {
    /// Power-on state: only Interrupt Disable is set.
    pub const fn power_on() -> Self {
        Self::INTERRUPT_DISABLE
    }

    /// Packs the flags into a status byte.
    pub fn register(&self) -> u8 {
        self.bits()
    }

    /// Replaces every flag from a packed status byte; bit 5 is ignored.
    pub fn set_register(&mut self, value: u8) {
        *self = Self::from_bits_truncate(value);
    }

    /// Clears every flag, then sets Interrupt Disable.
    pub fn reset(&mut self) {
        *self = Self::power_on();
    }

    /// Returns the carry flag as 1 or 0 for arithmetic.
    pub fn carry_as_int(&self) -> u8 {
        u8::from(self.carry())
    }

    /// Sets Zero and Negative from a result byte.
    pub fn update_zero_negative(&mut self, value: u8) {
        self.set(Self::ZERO, value == 0);
        self.set(Self::NEGATIVE, value & 0x80 != 0);
    }

    pub fn carry(&self) -> bool {
        self.contains(Self::CARRY)
    }

    pub fn zero(&self) -> bool {
        self.contains(Self::ZERO)
    }

    pub fn interrupt_disable(&self) -> bool {
        self.contains(Self::INTERRUPT_DISABLE)
    }

    pub fn decimal(&self) -> bool {
        self.contains(Self::DECIMAL)
    }

    pub fn break_command(&self) -> bool {
        self.contains(Self::BREAK)
    }

    pub fn overflow(&self) -> bool {
        self.contains(Self::OVERFLOW)
    }

    pub fn negative(&self) -> bool {
        self.contains(Self::NEGATIVE)
    }

    pub fn set_carry(&mut self, value: bool) {
        self.set(Self::CARRY, value);
    }

    pub fn set_zero(&mut self, value: bool) {
        self.set(Self::ZERO, value);
    }

    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.set(Self::INTERRUPT_DISABLE, value);
    }

    pub fn set_decimal(&mut self, value: bool) {
        self.set(Self::DECIMAL, value);
    }

    pub fn set_break_command(&mut self, value: bool) {
        self.set(Self::BREAK, value);
    }

    pub fn set_overflow(&mut self, value: bool) {
        self.set(Self::OVERFLOW, value);
    }

    pub fn set_negative(&mut self, value: bool) {
        self.set(Self::NEGATIVE, value);
    }
}
