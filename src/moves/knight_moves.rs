use crate::board_location::BoardLocation;

/// Whether `start` → `stop` is one of the eight knight offsets,
/// (±1, ±2) or (±2, ±1). Knights jump, so occupancy between the squares
/// never matters.
pub fn is_knight_step(start: BoardLocation, stop: BoardLocation) -> bool {
    let d_file = (stop.file() - start.file()).abs();
    let d_rank = (stop.rank() - start.rank()).abs();
    (d_file == 1 && d_rank == 2) || (d_file == 2 && d_rank == 1)
}
