use util::DIR_8;

use crate::{prelude::*, scratch::FlowQueue, Floor, Player, TerrainQuery};

/// Extra flow cost for passing through a closed door.
const DOOR_COST: u16 = 3;

/// Recompute the flow field creatures use to track the player.
///
/// `origin` holds the point the previous field was seeded from. When the
/// player is running and that point is still in view the old field is kept.
/// Returns whether the field was rebuilt.
pub(crate) fn recompute(
    floor: &mut Floor,
    terrain: &impl TerrainQuery,
    player: &Player,
    depth: u16,
    origin: &mut Option<IVec2>,
    queue: &mut FlowQueue,
) -> bool {
    if player.running
        && origin.is_some_and(|p| floor.is_in_view(p))
    {
        return false;
    }

    floor.clear_flow();
    *origin = Some(player.pos);
    queue.reset();
    queue.push(player.pos);

    while let Some(t) = queue.pop() {
        let (cost, dist) = (floor[t].cost, floor[t].distance);

        for d in DIR_8 {
            let p = t + d;
            if p == player.pos || !floor.contains(p) {
                continue;
            }

            let door = terrain.is_closed_door(p);
            let m = cost.saturating_add(if door { DOOR_COST + 1 } else { 1 });
            let n = dist + 1;

            let tile = &mut floor[p];
            // Already reached at least as well.
            if tile.distance != 0 && tile.distance <= n && tile.cost <= m {
                continue;
            }

            if !terrain.is_walkable(p) && !door {
                continue;
            }

            if tile.cost == 0 || tile.cost > m {
                tile.cost = m;
            }
            if tile.distance == 0 || tile.distance > n {
                tile.distance = n;
            }

            if n >= depth {
                continue;
            }
            queue.push(p);
        }
    }

    if queue.dropped() > 0 {
        log::debug!("flow pass dropped {} queue entries", queue.dropped());
    }

    true
}
