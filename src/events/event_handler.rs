/// Something that reacts to events published on a channel, e.g. a view
/// observing engine events.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
