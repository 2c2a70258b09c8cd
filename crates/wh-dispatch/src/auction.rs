//! Contract-net style auction.

use tracing::debug;

use wh_core::Tick;
use wh_fleet::Robot;
use wh_fleet::bidding::AUCTION_MIN_BATTERY;

use crate::dispatcher::lowest;
use crate::{Dispatcher, Mechanism, OrderBook};

/// Ticks between announcement rounds.
const ANNOUNCE_INTERVAL: u64 = 2;

/// Every second tick, each pending order (oldest first) is announced to the
/// idle robots with battery above 30.  The lowest
/// [`auction_bid`](Robot::auction_bid) wins; ties go to the lower robot id.
/// A robot that wins is no longer idle, so it cannot win twice in one round.
#[derive(Copy, Clone, Debug, Default)]
pub struct AuctionDispatcher;

impl Dispatcher for AuctionDispatcher {
    fn mechanism(&self) -> Mechanism {
        Mechanism::Cnp
    }

    fn allocate(&self, tick: Tick, robots: &mut [Robot], orders: &mut OrderBook) -> usize {
        if !tick.is_multiple_of(ANNOUNCE_INTERVAL) {
            return 0;
        }

        let mut assigned = 0;
        for id in orders.pending_ids() {
            let Some(task) = orders.get(id).map(|o| o.task()) else {
                continue;
            };
            let bids = robots
                .iter()
                .enumerate()
                .filter(|(_, r)| r.is_idle() && r.battery > AUCTION_MIN_BATTERY)
                .map(|(i, r)| (i, r.auction_bid(&task)));
            let Some((winner, bid)) = lowest(bids) else {
                continue;
            };

            let robot = &mut robots[winner];
            robot.assign(orders.assign(id, robot.id));
            debug!(order = %id, robot = %robot.id, bid, %tick, "auction won");
            assigned += 1;
        }
        assigned
    }
}
