use itertools::Itertools;

use crate::problem::location::LocationIdx;

use super::route::Route;

/// Lazily enumerates every hub-relayed route starting at `start`.
///
/// The remaining centers (`required` without `start`, deduplicated and in
/// ascending order) are visited in every possible order, returning to the
/// hub after each one. With `k` required centers this yields `(k - 1)!`
/// routes, and the single route `[start, hub]` when `start` is the only one.
pub fn generate_routes(
    start: LocationIdx,
    required: &[LocationIdx],
    hub: LocationIdx,
) -> impl Iterator<Item = Route> + use<> {
    let remaining = required
        .iter()
        .copied()
        .filter(|&center| center != start)
        .sorted_unstable()
        .dedup()
        .collect::<Vec<_>>();
    let k = remaining.len();

    remaining.into_iter().permutations(k).map(move |order| {
        let mut stops = Vec::with_capacity(2 + 2 * order.len());
        stops.push(start);
        stops.push(hub);

        for center in order {
            stops.push(center);
            stops.push(hub);
        }

        Route::new(stops)
    })
}

/// Number of routes [`generate_routes`] yields for `centers` distinct
/// required centers, from one start.
pub fn routes_per_start(centers: usize) -> usize {
    (1..centers).product()
}
