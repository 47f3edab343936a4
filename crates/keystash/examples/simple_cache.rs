// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Two components sharing one in-memory backend.
//!
//! The facade only clears what it wrote, so the other component's entry
//! survives `clear`.

use std::{error::Error, sync::Arc, time::Duration};

use keystash::{Backend, MemoryBackend, SimpleCache, Ttl};
use keystash_backend::SaveOptions;
use tick::runtime::InactiveClock;

fn main() -> Result<(), Box<dyn Error>> {
    // Reading wall-clock time does not need the driver to be advanced.
    let (clock, _driver) = InactiveClock::default().activate();

    let backend = Arc::new(MemoryBackend::<String>::new(clock.clone()));
    let cache = SimpleCache::<String, _>::builder(Arc::clone(&backend), clock).name("profiles").build();

    // Written directly, without the facade's namespace tag.
    backend
        .save("session:42", "opaque".to_string(), &SaveOptions::new().with_tag("sessions"))?;

    cache.set("user:1", "Alice".to_string(), Duration::from_secs(300))?;
    cache.set_multiple(
        [("user:2", "Bob".to_string()), ("user:3", "Carol".to_string())],
        Ttl::None,
    )?;

    let users = cache.get_multiple(["user:1", "user:2", "user:4"], "<unknown>".to_string())?;
    let mut names: Vec<_> = users.iter().collect();
    names.sort();
    for (key, name) in names {
        println!("{key} => {name}");
    }

    println!("cleared: {}", cache.clear());
    println!("user:1 still cached: {}", cache.has("user:1")?);
    println!("session:42 still stored: {}", backend.load("session:42")?.is_some());

    Ok(())
}
