/// Engine-side switches the core flips: console variables and map entities.
pub trait World {
    /// `mp_teammates_are_enemies`; on while box mode is active.
    fn set_teammates_are_enemies(&mut self, enabled: bool);

    /// Open or close every cell door on the map.
    fn set_cells_open(&mut self, open: bool);
}
