//! Benchmark comparing protolite vs prost for encode/decode.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

mod prost_types {
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Event {
        #[prost(int32, tag = "1")]
        pub name: i32,
        #[prost(message, optional, tag = "3")]
        pub tab_update_payload: Option<TabUpdatePayload>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct TabUpdatePayload {
        #[prost(message, repeated, tag = "1")]
        pub tab_info: Vec<TabInfo>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct TabInfo {
        #[prost(uint32, tag = "1")]
        pub position: u32,
        #[prost(string, tag = "2")]
        pub name: String,
        #[prost(bool, tag = "3")]
        pub active: bool,
        #[prost(uint32, tag = "4")]
        pub panes_to_hide: u32,
        #[prost(bool, tag = "5")]
        pub is_fullscreen_active: bool,
        #[prost(bool, tag = "6")]
        pub is_sync_panes_active: bool,
        #[prost(bool, tag = "7")]
        pub are_floating_panes_visible: bool,
        #[prost(uint32, repeated, packed = "true", tag = "8")]
        pub other_focused_clients: Vec<u32>,
        #[prost(string, optional, tag = "9")]
        pub active_swap_layout_name: Option<String>,
        #[prost(bool, tag = "10")]
        pub is_swap_layout_dirty: bool,
    }
}

fn create_prost_event(num_tabs: u32) -> prost_types::Event {
    prost_types::Event {
        name: 1,
        tab_update_payload: Some(prost_types::TabUpdatePayload {
            tab_info: (0..num_tabs)
                .map(|i| prost_types::TabInfo {
                    position: i,
                    name: format!("Tab #{}", i + 1),
                    active: i == 0,
                    panes_to_hide: i % 4,
                    other_focused_clients: (0..i % 5).collect(),
                    active_swap_layout_name: Some("BASE".to_string()),
                    ..Default::default()
                })
                .collect(),
        }),
    }
}

fn create_protolite_event(num_tabs: u32) -> protolite::schema::Event {
    use protolite::schema::{Event, EventPayload, EventType, TabInfo, TabUpdatePayload};

    let tab_info = (0..num_tabs)
        .map(|i| TabInfo {
            position: i,
            name: format!("Tab #{}", i + 1),
            active: i == 0,
            panes_to_hide: i % 4,
            other_focused_clients: (0..i % 5).collect(),
            active_swap_layout_name: Some("BASE".to_string()),
            ..Default::default()
        })
        .collect();

    Event::new(
        EventType::TabUpdate,
        Some(EventPayload::TabUpdate(TabUpdatePayload { tab_info })),
    )
}

fn encode_benchmark(c: &mut Criterion) {
    use prost::Message as _;
    use protolite::ProtoMessage as _;

    let mut group = c.benchmark_group("encode");

    for num_tabs in [0, 1, 10, 100] {
        let prost_event = create_prost_event(num_tabs);
        let protolite_event = create_protolite_event(num_tabs);

        let encoded_size = prost_event.encoded_len();
        group.throughput(Throughput::Bytes(encoded_size as u64));

        group.bench_with_input(
            BenchmarkId::new("prost", num_tabs),
            &prost_event,
            |b, event| {
                b.iter(|| {
                    let mut buf = Vec::with_capacity(event.encoded_len());
                    event.encode(&mut buf).unwrap();
                    std::hint::black_box(buf)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("protolite", num_tabs),
            &protolite_event,
            |b, event| b.iter(|| std::hint::black_box(event.encode_to_vec())),
        );

        group.bench_with_input(
            BenchmarkId::new("protolite_bytes", num_tabs),
            &protolite_event,
            |b, event| b.iter(|| std::hint::black_box(event.encode())),
        );
    }

    group.finish();
}

fn decode_benchmark(c: &mut Criterion) {
    use prost::Message as _;
    use protolite::ProtoMessage as _;

    let mut group = c.benchmark_group("decode");

    for num_tabs in [0, 1, 10, 100] {
        // Encode with prost to get wire-compatible bytes
        let encoded = create_prost_event(num_tabs).encode_to_vec();

        group.throughput(Throughput::Bytes(encoded.len() as u64));

        group.bench_with_input(BenchmarkId::new("prost", num_tabs), &encoded, |b, data| {
            b.iter(|| {
                let event = prost_types::Event::decode(&data[..]).unwrap();
                std::hint::black_box(event)
            })
        });

        group.bench_with_input(
            BenchmarkId::new("protolite", num_tabs),
            &encoded,
            |b, data| {
                b.iter(|| {
                    let event = protolite::schema::Event::decode(data).unwrap();
                    std::hint::black_box(event)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, encode_benchmark, decode_benchmark);
criterion_main!(benches);
