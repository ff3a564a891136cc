use pngsteg_frame::{frame_bit_len, HEADER_BITS};
use pngsteg_pixel::{decode, encode, read, PixelGrid, PixelLayout, StegError, Traversal};
use proptest::collection::vec;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
    (8u32..24, 8u32..24, any::<bool>()).prop_flat_map(|(width, height, alpha)| {
        let layout = if alpha {
            PixelLayout::Rgba
        } else {
            PixelLayout::Rgb
        };
        let len = width as usize * height as usize * layout.channels();
        vec(any::<u8>(), len).prop_map(move |data| {
            PixelGrid::from_raw(width, height, layout, data).expect("buffer sized for grid")
        })
    })
}

fn flip_slot_lsb(grid: &mut PixelGrid, index: usize) {
    let slot = Traversal::new(grid.width(), grid.height())
        .nth(index)
        .expect("slot index within capacity");
    let channel = slot.channel.index();
    let pixel = grid
        .pixel_mut(slot.x, slot.y)
        .expect("slot inside the grid");
    pixel[channel] ^= 1;
}

proptest! {
    #[test]
    fn prop_roundtrip(grid in grid_strategy(), message in "\\PC{0,16}") {
        prop_assume!(frame_bit_len(message.len()) <= grid.capacity());

        let (encoded, report) = encode(&grid, &message).unwrap();
        prop_assert_eq!(report.bits_written, frame_bit_len(message.len()));
        prop_assert_eq!(decode(&encoded).unwrap(), message);
    }

    #[test]
    fn prop_encode_is_deterministic(grid in grid_strategy(), message in "\\PC{0,16}") {
        prop_assume!(frame_bit_len(message.len()) <= grid.capacity());

        let (first, _) = encode(&grid, &message).unwrap();
        let (second, _) = encode(&grid, &message).unwrap();
        prop_assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn prop_only_written_lsbs_change(grid in grid_strategy(), message in "\\PC{0,16}") {
        prop_assume!(frame_bit_len(message.len()) <= grid.capacity());

        let (encoded, report) = encode(&grid, &message).unwrap();
        let layout = grid.layout();
        let width = grid.width();

        for (index, slot) in Traversal::new(width, grid.height()).enumerate() {
            let offset = slot.offset(width, layout);
            let before = grid.as_raw()[offset];
            let after = encoded.as_raw()[offset];
            if index < report.bits_written {
                prop_assert_eq!(before & 0xFE, after & 0xFE);
            } else {
                prop_assert_eq!(before, after);
            }
        }

        if layout.has_alpha() {
            for (before, after) in grid.as_raw().chunks(4).zip(encoded.as_raw().chunks(4)) {
                prop_assert_eq!(before[3], after[3]);
            }
        }
    }

    #[test]
    fn prop_header_flip_never_panics(
        grid in grid_strategy(),
        message in "\\PC{0,16}",
        bit in 0usize..HEADER_BITS,
    ) {
        prop_assume!(frame_bit_len(message.len()) <= grid.capacity());

        let (mut encoded, _) = encode(&grid, &message).unwrap();
        flip_slot_lsb(&mut encoded, bit);

        match decode(&encoded) {
            Ok(decoded) => prop_assert_ne!(decoded.len(), message.len()),
            Err(StegError::Frame(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn prop_reader_is_bounded_by_capacity(grid in grid_strategy()) {
        prop_assert_eq!(read(&grid).count(), grid.capacity());
    }
}
