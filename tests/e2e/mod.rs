// End-to-end tests for the PR voice backend API
//
// Each test starts its own server on an ephemeral port with the speech API
// replaced by an in-memory stub and the simulated audio output, so tests
// run in parallel without sharing a take.

mod helpers;
mod test_playback;
mod test_voices;
