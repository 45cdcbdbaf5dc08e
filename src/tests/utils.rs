use crate::{EventQueue, EventType, Timeout};
use crate::storage::Storage;

pub const ITEM_SIZE: usize = 4;

pub fn encode(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_le_bytes()).collect()
}

pub fn decode(bytes: &[u8]) -> Vec<u32> {
    bytes.chunks_exact(ITEM_SIZE)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

pub fn put_values<S: Storage>(queue: &EventQueue<S>, events: &[(EventType, u32)], timeout: Timeout) -> usize {
    let types: Vec<EventType> = events.iter().map(|&(event_type, _)| event_type).collect();
    let values: Vec<u32> = events.iter().map(|&(_, value)| value).collect();
    queue.put(&encode(&values), &types, timeout)
}

pub fn get_values<S: Storage>(
    queue: &EventQueue<S>,
    filters: &[EventType],
    max: usize,
    timeout: Timeout
) -> Vec<(EventType, u32)> {
    let mut payloads = vec![0; max * ITEM_SIZE];
    let mut types = vec![0; max];
    let got = queue.get(&mut payloads, &mut types, filters, timeout);
    types.truncate(got);
    types.into_iter().zip(decode(&payloads[..got * ITEM_SIZE])).collect()
}

/// What is stored, oldest first.
pub fn stored<S: Storage>(queue: &EventQueue<S>) -> Vec<(EventType, u32)> {
    let mut v = Vec::new();
    queue.storage().for_each(|event_type, payload| {
        v.push((event_type, decode(payload)[0]));
    });
    v
}
