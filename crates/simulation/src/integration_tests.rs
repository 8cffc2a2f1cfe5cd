//! Integration tests for the vignette session using the `TestVignette` harness.
//!
//! These tests spin up a headless Bevy App with `SimulationPlugin` and drive
//! the loading gate, the heightmap task and the motion sequence together.
