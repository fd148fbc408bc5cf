use eyre::Result;
use rail_booking_core::TravelClass;
use rail_booking_tests::{BookingOutcome, TestCtx};

/// Books tickets and checks that the booking was confirmed and accounted for.
#[allow(unused)]
pub fn book_confirmed(ctx: &mut TestCtx, class: TravelClass, count: u32) -> Result<()> {
    let available = ctx.available(class)?;
    let total = ctx.registry.total_booked_seats();

    match ctx.book(class, count)? {
        BookingOutcome::Confirmed(confirmation) => {
            assert_eq!(confirmation.seats, count);
            assert_eq!(
                confirmation.coaches.iter().map(|c| c.seats).sum::<u32>(),
                count,
                "The coach split must add up to the booked seats."
            );
        }
        BookingOutcome::Rejected(reason) => {
            panic!("Booking {count} of {available} seats in {class} must succeed: {reason}")
        }
    }

    assert_eq!(
        ctx.available(class)?,
        available - count,
        "After booking {count} seats, {class} must have {count} seats less."
    );
    assert_eq!(
        ctx.registry.total_booked_seats(),
        total + u64::from(count),
        "After booking {count} seats, the total must grow by {count}."
    );
    Ok(())
}
