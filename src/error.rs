/// Transient failure while computing a filter update.
///
/// These never escape the controller: they are reported through
/// [`Notice::UpdateFailed`](crate::Notice::UpdateFailed) and the next event
/// or tick proceeds normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LightError {
    /// The sensor delivered NaN or an infinite value
    #[error("lux reading is not a finite number")]
    NonFiniteLux,
    /// The brightness curve could not answer the lookup
    #[error("brightness curve lookup failed")]
    CurveLookup,
}
