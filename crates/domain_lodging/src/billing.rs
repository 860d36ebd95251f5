//! Stay charges

use core_kernel::{Money, MoneyError};
use crate::reservation::Reservation;

/// Amount due for a stay: `nights × rate_per_night`, exact in decimal
pub fn amount_due(nights: i64, rate_per_night: Money) -> Result<Money, MoneyError> {
    rate_per_night.checked_times(nights)
}

/// Amount due for a reservation at the given nightly rate
pub fn reservation_charge(
    reservation: &Reservation,
    rate_per_night: Money,
) -> Result<Money, MoneyError> {
    amount_due(reservation.nights(), rate_per_night)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_three_nights_at_default_rate() {
        let due = amount_due(3, Money::new(dec!(100), Currency::USD)).unwrap();
        assert_eq!(due.amount(), dec!(300));
    }

    #[test]
    fn test_fractional_rate() {
        let due = amount_due(2, Money::new(dec!(89.99), Currency::EUR)).unwrap();
        assert_eq!(due.amount(), dec!(179.98));
        assert_eq!(due.currency(), Currency::EUR);
    }

    proptest! {
        #[test]
        fn charge_is_linear_in_nights(nights in 1i64..1000i64, cents in 0i64..100_000i64) {
            let rate = Money::new(Decimal::new(cents, 2), Currency::USD);
            let one_more = amount_due(nights + 1, rate).unwrap();
            let base = amount_due(nights, rate).unwrap();
            prop_assert_eq!(one_more.checked_sub(&base).unwrap(), rate);
        }
    }
}
