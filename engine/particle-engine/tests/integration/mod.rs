mod effects;
mod emitter_lifecycle;
