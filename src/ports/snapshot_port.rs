//! Portfolio snapshot persistence port trait.

use crate::domain::error::TraderError;
use crate::domain::portfolio::Portfolio;

/// Saving keeps date, cash and holdings; the transaction log lives only
/// for the process, so a loaded portfolio starts with an empty log.
pub trait SnapshotPort {
    fn load(&self) -> Result<Portfolio, TraderError>;
    fn save(&self, portfolio: &Portfolio) -> Result<(), TraderError>;
}
