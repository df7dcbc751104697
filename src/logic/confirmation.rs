/// Yes/no gate in front of a destructive action.
///
/// The gate is armed with the record about to be removed. `confirm` hands that
/// record to the deletion callback and disarms; `cancel` disarms without
/// touching anything. There is no timeout and no undo.
#[derive(Debug, Clone)]
pub struct ConfirmationGate<T> {
    target: Option<T>,
}

impl<T> Default for ConfirmationGate<T> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<T> ConfirmationGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(target: T) -> Self {
        Self {
            target: Some(target),
        }
    }

    pub fn arm(&mut self, target: T) {
        self.target = Some(target);
    }

    pub fn is_armed(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Run the callback on the armed target. A disarmed gate returns `None`
    /// without calling it.
    pub fn confirm<F, O>(&mut self, on_confirm: F) -> Option<O>
    where
        F: FnOnce(T) -> O,
    {
        self.target.take().map(on_confirm)
    }

    /// Disarm, handing back the target that was pending
    pub fn cancel(&mut self) -> Option<T> {
        self.target.take()
    }
}
