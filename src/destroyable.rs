// implemented by subscribers holding an Rc back into their own channel; the
// cycle has to be broken by hand
pub trait Destroyable {
    fn destroy(&mut self);
}
