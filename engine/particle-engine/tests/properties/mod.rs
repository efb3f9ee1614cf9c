mod buffer;
mod emitter;
