//! Radio tuner configuration
//!
//! The receive chain is tuned through a second register window: a fake-ADC
//! DDS and a digital tuner, each programmed with a phase increment derived
//! from the requested frequency, plus a GPIO bit that gates sample flow into
//! the receive FIFO. Tuning happens once per operator action, well off the
//! streaming hot path, so every access goes through validated handles.

use crate::error::Result;
use crate::mmio::{Reg, RegisterWindow};

/// Fake-ADC phase increment register, in 32-bit words
pub const FAKE_ADC_PINC_OFFSET: usize = 0;
/// Tuner phase increment register, in 32-bit words
pub const TUNER_PINC_OFFSET: usize = 1;
/// Control register, in 32-bit words
pub const CONTROL_REG_OFFSET: usize = 2;
/// Timer register, in 32-bit words
pub const TIMER_REG_OFFSET: usize = 3;

/// System clock feeding the DDS accumulators
pub const SYSTEM_CLOCK_HZ: f64 = 125e6;
/// Width of the DDS phase accumulators
pub const PHASE_BITS: u32 = 27;

/// Phase increment for the fake-ADC DDS: `freq * 2^27 / 125 MHz`,
/// truncated toward zero and wrapped to the 32-bit register width.
pub fn adc_phase_increment(freq_hz: f64) -> u32 {
    (freq_hz * (1u64 << PHASE_BITS) as f64 / SYSTEM_CLOCK_HZ) as i64 as u32
}

/// Phase increment for the tuner DDS: same scaling, negated, so the tuner
/// mixes the requested frequency down to baseband.
pub fn tuner_phase_increment(tune_freq_hz: f64) -> u32 {
    (-tune_freq_hz * (1u64 << PHASE_BITS) as f64 / SYSTEM_CLOCK_HZ) as i64 as u32
}

/// Tuner register file over a mapped window
pub struct RadioTuner<'a> {
    adc_pinc: Reg<'a>,
    tuner_pinc: Reg<'a>,
}

impl<'a> RadioTuner<'a> {
    /// Bind the tuner registers of a mapped window
    pub fn new(window: &'a RegisterWindow) -> Result<Self> {
        let adc_pinc = window.reg(FAKE_ADC_PINC_OFFSET)?;
        let tuner_pinc = window.reg(TUNER_PINC_OFFSET)?;
        Ok(RadioTuner {
            adc_pinc,
            tuner_pinc,
        })
    }

    /// Program the fake-ADC DDS frequency
    pub fn set_adc_frequency(&self, freq_hz: f64) {
        self.adc_pinc.write(adc_phase_increment(freq_hz));
    }

    /// Program the tuner mixing frequency
    pub fn set_tune_frequency(&self, freq_hz: f64) {
        self.tuner_pinc.write(tuner_phase_increment(freq_hz));
    }

    /// Read back the programmed fake-ADC phase increment
    pub fn adc_pinc(&self) -> u32 {
        self.adc_pinc.read()
    }

    /// Read back the programmed tuner phase increment
    pub fn tuner_pinc(&self) -> u32 {
        self.tuner_pinc.read()
    }
}

/// Streaming gate: the GPIO bit that lets samples flow into the receive FIFO
pub struct StreamGate<'a> {
    enable: Reg<'a>,
}

impl<'a> StreamGate<'a> {
    /// Bind the enable register (word offset 0) of the GPIO window
    pub fn new(window: &'a RegisterWindow) -> Result<Self> {
        Ok(StreamGate {
            enable: window.reg(0)?,
        })
    }

    /// Open or close the gate
    pub fn set_enabled(&self, enabled: bool) {
        self.enable.write(u32::from(enabled));
    }

    /// Current gate state
    pub fn is_enabled(&self) -> bool {
        self.enable.read() & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_increment_scaling() {
        // 30 MHz: 30e6 * 2^27 / 125e6 = 32212254.72, truncated
        assert_eq!(adc_phase_increment(30e6), 32_212_254);
        assert_eq!(adc_phase_increment(0.0), 0);
        // Full system clock maps to exactly 2^27
        assert_eq!(adc_phase_increment(SYSTEM_CLOCK_HZ), 1 << PHASE_BITS);
    }

    #[test]
    fn tuner_increment_is_negated_adc_increment() {
        for freq in [0.0, 1e3, 97.3e6, 30e6] {
            assert_eq!(
                tuner_phase_increment(freq),
                adc_phase_increment(freq).wrapping_neg()
            );
        }
    }

    #[test]
    fn tuner_increment_wraps_as_twos_complement() {
        // -32212254 wrapped into 32 bits
        assert_eq!(tuner_phase_increment(30e6), 0xFE14_7AE2);
    }

    #[test]
    fn tuner_programs_and_reads_back() {
        let window = RegisterWindow::map_anon(4096);
        let tuner = RadioTuner::new(&window).unwrap();

        tuner.set_adc_frequency(30e6);
        tuner.set_tune_frequency(30e6);
        assert_eq!(tuner.adc_pinc(), adc_phase_increment(30e6));
        assert_eq!(tuner.tuner_pinc(), tuner_phase_increment(30e6));
    }

    #[test]
    fn stream_gate_toggles_enable_bit() {
        let window = RegisterWindow::map_anon(4096);
        let gate = StreamGate::new(&window).unwrap();

        gate.set_enabled(true);
        assert!(gate.is_enabled());
        gate.set_enabled(false);
        assert!(!gate.is_enabled());
    }
}
