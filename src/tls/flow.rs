//! `Tls::plan_flow`/`build`: the state machine that decides whether a
//! handshake fits the flow's remaining budget and, if so, slices it into
//! packet-sized segments (C8). Grounded on `generator::Tls::PlanFlow`/
//! `Build` in `layers/tls.cpp`.

use super::builder::TlsBuilder;
use super::buffer::TlsBuffer;
use super::constants::{MIN_APPLICATION_DATA_PKT_LEN, PACKET_SPLIT_THRESHOLD};
use crate::error::{CoreError, Result};
use crate::flow_plan::{Direction, FlowPlan, PktSlot};
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Init,
    Planned { handshake_included: bool },
    Built,
}

/// Per-flow TLS layer: owns the handshake builder and the rendered message
/// store `build` replays from.
pub struct Tls {
    builder: TlsBuilder,
    message_store: Vec<Vec<u8>>,
    max_payload_size_hint: u64,
    state: State,
}

struct HandshakeSegment {
    bytes: Vec<u8>,
    direction: Direction,
}

impl Tls {
    pub fn new<R: RandomSource>(rng: &mut R, max_payload_size_hint: u64) -> Tls {
        Tls {
            builder: TlsBuilder::new(rng),
            message_store: Vec::new(),
            max_payload_size_hint,
            state: State::Init,
        }
    }

    fn make_handshake_segments<R: RandomSource>(&self, rng: &mut R) -> Result<Vec<HandshakeSegment>> {
        let max_len = std::cmp::max(PACKET_SPLIT_THRESHOLD as u64, self.max_payload_size_hint) as usize;
        let mut segments = Vec::new();

        let mut put = |messages: Vec<Vec<u8>>, dir: Direction, segments: &mut Vec<HandshakeSegment>| {
            let combined = TlsBuffer::concat(messages);
            for chunk in TlsBuffer::split(&combined, max_len) {
                segments.push(HandshakeSegment {
                    bytes: chunk,
                    direction: dir,
                });
            }
        };

        put(
            vec![self.builder.build_client_hello(rng)?],
            Direction::Forward,
            &mut segments,
        );
        put(
            vec![
                self.builder.build_server_hello()?,
                self.builder.build_certificate()?,
                self.builder.build_server_key_exchange(rng)?,
                self.builder.build_server_hello_done()?,
            ],
            Direction::Reverse,
            &mut segments,
        );
        put(
            vec![
                self.builder.build_client_key_exchange(rng)?,
                self.builder.build_change_cipher_spec()?,
                self.builder.build_encrypted_handshake(rng)?,
            ],
            Direction::Forward,
            &mut segments,
        );
        put(
            vec![
                self.builder.build_change_cipher_spec()?,
                self.builder.build_encrypted_handshake(rng)?,
            ],
            Direction::Reverse,
            &mut segments,
        );

        Ok(segments)
    }

    fn should_include_handshake<P: FlowPlan>(plan: &P, segments: &[HandshakeSegment]) -> bool {
        let mut fwd_pkts = 0u64;
        let mut rev_pkts = 0u64;
        let mut fwd_bytes = 0u64;
        let mut rev_bytes = 0u64;

        for seg in segments {
            match seg.direction {
                Direction::Forward => {
                    fwd_pkts += 1;
                    fwd_bytes += seg.bytes.len() as u64;
                }
                Direction::Reverse => {
                    rev_pkts += 1;
                    rev_bytes += seg.bytes.len() as u64;
                }
            }
        }

        plan.pkts_remaining(Direction::Forward) >= fwd_pkts
            && plan.bytes_remaining(Direction::Forward) >= fwd_bytes
            && plan.pkts_remaining(Direction::Reverse) >= rev_pkts
            && plan.bytes_remaining(Direction::Reverse) >= rev_bytes
            && plan.total_pkts_remaining() > fwd_pkts + rev_pkts
            && plan.total_bytes_remaining() > fwd_bytes + rev_bytes + MIN_APPLICATION_DATA_PKT_LEN
    }

    /// Plans this flow: decides whether the handshake fits the remaining
    /// budget, reserves packet slots for it if so, then fills the rest of
    /// the flow with application-data slots.
    pub fn plan_flow<R: RandomSource, P: FlowPlan>(
        &mut self,
        plan: &mut P,
        rng: &mut R,
    ) -> Result<()> {
        if self.state != State::Init {
            return Err(CoreError::LogicError(
                "plan_flow called outside the Init state".to_string(),
            ));
        }

        let segments = self.make_handshake_segments(rng)?;
        let handshake_included = Self::should_include_handshake(&*plan, &segments);

        if handshake_included {
            for seg in segments {
                let mut slot = plan.next_packet();
                let store_index = self.message_store.len();
                slot.size += seg.bytes.len() as u64;
                self.message_store.push(seg.bytes);
                slot.direction = Some(seg.direction);
                slot.is_finished = true;
                slot.store_index = Some(store_index);
                plan.include_pkt(slot);
            }
        }

        while plan.pkts_till_end() > 0 {
            let mut slot = plan.next_packet();
            slot.size += MIN_APPLICATION_DATA_PKT_LEN;
            plan.include_pkt(slot);
        }

        self.state = State::Planned {
            handshake_included,
        };
        Ok(())
    }

    /// Emits the bytes for one previously planned slot: the stored
    /// handshake segment if `store_index` is set, else a freshly synthesized
    /// application-data record of exactly `slot.size` bytes.
    pub fn build<R: RandomSource>(&mut self, slot: &PktSlot, rng: &mut R) -> Result<Vec<u8>> {
        match self.state {
            State::Init => {
                return Err(CoreError::LogicError(
                    "build called before plan_flow".to_string(),
                ))
            }
            State::Planned { .. } | State::Built => {}
        }
        self.state = State::Built;

        if let Some(index) = slot.store_index {
            let bytes = self
                .message_store
                .get(index)
                .ok_or_else(|| CoreError::LogicError("store_index out of range".to_string()))?;
            return Ok(bytes.clone());
        }
        self.builder.build_application_data(rng, slot.size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow_plan::test_support::FixedBudgetPlan;
    use crate::random::RngRandomSource;

    #[test]
    fn generous_budget_includes_handshake() {
        let mut rng = RngRandomSource::from_seed(1);
        let mut tls = Tls::new(&mut rng, 0);
        let mut plan = FixedBudgetPlan::new(50, 50, 100_000, 100_000);
        tls.plan_flow(&mut plan, &mut rng).unwrap();
        assert_eq!(tls.state, State::Planned { handshake_included: true });
        assert!(!tls.message_store.is_empty());
    }

    #[test]
    fn tight_budget_excludes_handshake() {
        // Matches spec §8 scenario 6: fwd=3, rev=2 packets, 200 bytes total
        // leaves no room for even one application-data packet on top.
        let mut rng = RngRandomSource::from_seed(1);
        let mut tls = Tls::new(&mut rng, 0);
        let mut plan = FixedBudgetPlan::new(3, 2, 200, 200);
        tls.plan_flow(&mut plan, &mut rng).unwrap();
        assert_eq!(
            tls.state,
            State::Planned {
                handshake_included: false
            }
        );
        assert!(tls.message_store.is_empty());
    }

    #[test]
    fn build_replays_stored_handshake_bytes_verbatim() {
        let mut rng = RngRandomSource::from_seed(2);
        let mut tls = Tls::new(&mut rng, 0);
        let mut plan = FixedBudgetPlan::new(50, 50, 100_000, 100_000);
        tls.plan_flow(&mut plan, &mut rng).unwrap();

        let slot = plan.included.first().cloned().unwrap();
        let built = tls.build(&slot, &mut rng).unwrap();
        assert_eq!(built.len() as u64, slot.size);
    }

    #[test]
    fn build_before_plan_is_logic_error() {
        let mut rng = RngRandomSource::from_seed(3);
        let mut tls = Tls::new(&mut rng, 0);
        let slot = PktSlot::new();
        assert!(tls.build(&slot, &mut rng).is_err());
    }
}
