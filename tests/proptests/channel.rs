//! Property-based tests for the channel.
//!
//! # Coverage
//!
//! - **FIFO delivery:** any sequence of pushes followed by the same number of
//!   receives returns every item exactly once, in push order.
//! - **Close semantics:** close discards the backlog, pushes after close are
//!   ignored, and every receive after close reports the closure.

#[cfg(test)]
mod tests {
    use chanlog::Channel;
    use proptest::prelude::*;

    proptest! {
        /// **Property:** N pushes followed by N receives return the pushed
        /// items in order, and the channel is empty afterwards.
        #[test]
        fn test_push_then_recv_is_fifo(items in proptest::collection::vec(any::<u32>(), 0..256)) {
            let channel = Channel::new();
            for item in &items {
                channel.push(*item);
            }
            prop_assert_eq!(channel.len(), items.len());

            let received: Vec<u32> = (0..items.len()).filter_map(|_| channel.recv()).collect();
            prop_assert_eq!(received, items);
            prop_assert!(channel.is_empty());
        }

        /// **Property:** interleaved pushes and non-blocking receives behave
        /// like a queue.
        #[test]
        fn test_interleaved_ops_match_model(ops in proptest::collection::vec(any::<Option<u16>>(), 0..256)) {
            let channel = Channel::new();
            let mut model = std::collections::VecDeque::new();

            for op in ops {
                match op {
                    Some(value) => {
                        channel.push(value);
                        model.push_back(value);
                    }
                    None => prop_assert_eq!(channel.try_recv(), model.pop_front()),
                }
            }
            prop_assert_eq!(channel.len(), model.len());
        }

        /// **Property:** nothing pushed before or after close is delivered
        /// once the channel is closed.
        #[test]
        fn test_close_discards_everything(
            before in proptest::collection::vec(any::<u8>(), 0..64),
            after in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let channel = Channel::new();
            for item in &before {
                channel.push(*item);
            }
            channel.close();
            for item in &after {
                channel.push(*item);
            }

            prop_assert_eq!(channel.len(), 0);
            prop_assert!(channel.is_empty());
            prop_assert_eq!(channel.recv(), None);
            prop_assert_eq!(channel.try_recv(), None);
            prop_assert_eq!(channel.iter().count(), 0);
        }
    }
}
