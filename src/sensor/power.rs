/// Power inputs of the sensor, in power-up order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supply {
    /// I/O rail (VDDIO).
    Io,
    /// Digital core rail (VDD).
    Core,
    /// Analog rail (VAA).
    Analog,
    /// External clock gate.
    Clock,
}

impl Supply {
    pub const POWER_UP_ORDER: [Supply; 4] = [Supply::Io, Supply::Core, Supply::Analog, Supply::Clock];
}

/// Switches the sensor supplies and its external clock.
pub trait PowerControl {
    /// Returns true if `supply` is now on.
    fn enable(&mut self, supply: Supply) -> bool;
    /// Switches `supply` off.
    fn disable(&mut self, supply: Supply);
}

/// For boards with permanently powered sensors.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPower;

impl PowerControl for NoPower {
    fn enable(&mut self, _supply: Supply) -> bool {
        true
    }

    fn disable(&mut self, _supply: Supply) {}
}

/// Enables every supply in order. On failure the ones already enabled are
/// switched off again in reverse order.
pub(crate) fn power_up<P: PowerControl>(power: &mut P) -> Result<(), Supply> {
    for (idx, supply) in Supply::POWER_UP_ORDER.iter().enumerate() {
        if !power.enable(*supply) {
            for enabled in Supply::POWER_UP_ORDER[..idx].iter().rev() {
                power.disable(*enabled);
            }
            return Err(*supply);
        }
    }
    Ok(())
}

pub(crate) fn power_down<P: PowerControl>(power: &mut P) {
    for supply in Supply::POWER_UP_ORDER.iter().rev() {
        power.disable(*supply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::test_support::FakePower;
    use std::vec;

    #[test]
    fn power_up_enables_in_order() {
        let mut power = FakePower::new();
        power_up(&mut power).unwrap();
        assert_eq!(
            power.events(),
            vec![
                (Supply::Io, true),
                (Supply::Core, true),
                (Supply::Analog, true),
                (Supply::Clock, true),
            ]
        );
    }

    #[test]
    fn failed_supply_unwinds_in_reverse() {
        let mut power = FakePower::failing(Supply::Analog);
        assert_eq!(power_up(&mut power), Err(Supply::Analog));
        assert_eq!(
            power.events(),
            vec![
                (Supply::Io, true),
                (Supply::Core, true),
                (Supply::Core, false),
                (Supply::Io, false),
            ]
        );
    }

    #[test]
    fn power_down_is_reverse_order() {
        let mut power = FakePower::new();
        power_down(&mut power);
        assert_eq!(
            power.events(),
            vec![
                (Supply::Clock, false),
                (Supply::Analog, false),
                (Supply::Core, false),
                (Supply::Io, false),
            ]
        );
    }

    #[test]
    fn no_power_always_succeeds() {
        assert_eq!(power_up(&mut NoPower), Ok(()));
    }
}
