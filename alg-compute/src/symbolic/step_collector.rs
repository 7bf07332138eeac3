/// A type that records the steps taken by an algorithm.
///
/// Implemented for `()` to discard the steps, and for `Vec<S>` to keep them in order.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
