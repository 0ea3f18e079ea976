#![allow(dead_code)]

use core::mem::{offset_of, size_of};

use endianbytes::prelude::*;
use ux2::u4;

endian_bytes! {
    #[arch(order = little, width = 4)]
    pub struct Le4Asc: ascending;
    #[arch(order = little, width = 4)]
    pub struct Le4Desc: descending;
    #[arch(order = big, width = 8)]
    pub struct Be8Asc: ascending;
    #[arch(order = big, width = 8)]
    pub struct Be8Desc: descending;
    #[arch(order = middle, width = 4)]
    pub struct Pdp4Asc: ascending;
    #[arch(order = middle, width = 8)]
    pub struct Pdp8Desc: descending;
}

endian_bytes! {
    set 7 { tag_bits: u8 }
    #[arch(order = little, width = 8)]
    pub struct TaggedLe: descending;
    #[arch(order = big, width = 8)]
    pub struct TaggedBe: descending;
}

endian_bytes! {
    set 1 { nibble: u4, flag: bool, signed: i8 }
    #[arch(order = little, width = 4)]
    pub struct Mixed: ascending;
}

endian_bytes! {
    set 0 { low: u8 }
    #[arch(order = big, width = 4)]
    pub struct WithAlias: ascending;
    reset;
    #[arch(order = big, width = 4)]
    pub struct WithoutAlias: ascending;
}

endian_bytes! {
    pub union NativeAsc: ascending;
    pub union NativeDesc: descending;
    set 0 { tag: u8 }
    pub union TaggedPtr: ascending;
}

#[test]
fn test_sizes_have_no_padding() {
    assert_eq!(size_of::<Le4Asc>(), 4);
    assert_eq!(size_of::<Be8Desc>(), 8);
    assert_eq!(size_of::<Pdp8Desc>(), 8);
    assert_eq!(size_of::<TaggedLe>(), 8);
    assert_eq!(size_of::<Mixed>(), 4);
    assert_eq!(size_of::<NativeAsc>(), size_of::<*mut ()>());
    assert_eq!(size_of::<NativeDesc>(), size_of::<usize>());
}

#[test]
fn test_little_endian_four_bytes() {
    assert_eq!(offset_of!(Le4Asc, u8_0), 0);
    assert_eq!(offset_of!(Le4Desc, u8_0), 3);
    assert_eq!(Le4Desc::physical_offset(0), 3);

    let mut asc = Le4Asc::new();
    asc.set_u8_0(0xAA);
    assert_eq!(asc.to_bytes(), [0xAA, 0, 0, 0]);

    let mut desc = Le4Desc::new();
    desc.set_u8_0(0xAA);
    assert_eq!(desc.to_bytes(), [0, 0, 0, 0xAA]);
}

#[test]
fn test_big_endian_eight_bytes() {
    assert_eq!(offset_of!(Be8Asc, u8_0), 7);
    assert_eq!(offset_of!(Be8Desc, u8_0), 0);

    let word = Be8Asc::from_bytes(0x0102_0304_0506_0708u64.to_be_bytes());
    assert_eq!(word.u8_0(), 0x08);
    assert_eq!(word.u8_7(), 0x01);
    assert_eq!(word.hex().to_string(), "0102030405060708");

    let word = Be8Desc::from_bytes(0x0102_0304_0506_0708u64.to_be_bytes());
    assert_eq!(word.u8_0(), 0x01);
    assert_eq!(word.u8_7(), 0x08);
    assert_eq!(word.hex().to_string(), "0102030405060708");
}

#[test]
fn test_middle_endian_halves() {
    assert_eq!(offset_of!(Pdp4Asc, u8_0), 2);
    assert_eq!(offset_of!(Pdp4Asc, u8_1), 3);
    assert_eq!(offset_of!(Pdp4Asc, u8_2), 0);
    assert_eq!(offset_of!(Pdp4Asc, u8_3), 1);

    // 0x0A0B0C0D on a PDP-11.
    let word = Pdp4Asc::from_bytes([0x0B, 0x0A, 0x0D, 0x0C]);
    assert_eq!(word.u8_0(), 0x0D);
    assert_eq!(word.u8_1(), 0x0C);
    assert_eq!(word.u8_2(), 0x0B);
    assert_eq!(word.u8_3(), 0x0A);
    assert_eq!(word.hex().to_string(), "0a0b0c0d");

    let mut wide = Pdp8Desc::new();
    for position in 0..8 {
        wide.set_byte(position, position as u8);
    }
    assert_eq!(wide.to_bytes(), [1, 0, 3, 2, 5, 4, 7, 6]);
}

#[test]
fn test_descending_alias_on_first_cell() {
    assert_eq!(offset_of!(TaggedLe, u8_7), 0);
    assert_eq!(offset_of!(TaggedBe, u8_7), 7);

    let mut tagged = TaggedLe::new();
    tagged.set_tag_bits(0x5A);
    assert_eq!(tagged.u8_7(), 0x5A);
    assert_eq!(tagged.to_bytes(), [0x5A, 0, 0, 0, 0, 0, 0, 0]);

    tagged.set_u8_7(0xC3);
    assert_eq!(unsafe { tagged.tag_bits() }, 0xC3);
    assert_eq!(unsafe { tagged.u8_7.tag_bits }, 0xC3);
}

#[test]
fn test_aliases_share_storage() {
    let mut mixed = Mixed::new();
    mixed.set_signed(-1);
    assert_eq!(mixed.u8_1(), 0xFF);

    mixed.set_nibble(u4::new(0xA));
    assert_eq!(mixed.u8_1(), 0x0A);
    assert_eq!(unsafe { mixed.nibble() }, u4::new(0xA));

    mixed.set_flag(true);
    assert_eq!(mixed.to_bytes(), [0, 1, 0, 0]);
    assert!(unsafe { mixed.flag() });
}

#[test]
fn test_reset_drops_aliases() {
    let mut with = WithAlias::new();
    with.set_low(0x11);
    let mut without = WithoutAlias::new();
    without.set_u8_0(0x11);
    assert_eq!(with.to_bytes(), without.to_bytes());
    assert_eq!(with.to_bytes(), [0, 0, 0, 0x11]);
    assert_eq!(size_of::<WithoutAliasByte0>(), 1);
}

#[test]
fn test_common_impls() {
    let word = Le4Asc::from_bytes([1, 2, 3, 4]);
    assert_eq!(format!("{word:?}"), "Le4Asc { u8_0: 1, u8_1: 2, u8_2: 3, u8_3: 4 }");
    assert_eq!(Le4Asc::default(), Le4Asc::new());
    assert_ne!(word, Le4Asc::new());
    assert_eq!(word.significant_bytes().collect::<Vec<_>>(), [1, 2, 3, 4]);

    let desc = Le4Desc::from_bytes([1, 2, 3, 4]);
    assert_eq!(format!("{desc:?}"), "Le4Desc { u8_0: 4, u8_1: 3, u8_2: 2, u8_3: 1 }");
    assert_eq!(desc.significant_bytes().collect::<Vec<_>>(), [1, 2, 3, 4]);
    assert_eq!(format!("{:#}", desc.hex()), "0x04030201");
}

#[test]
#[should_panic(expected = "out of range")]
fn test_byte_out_of_range() {
    Le4Asc::new().byte(4);
}

#[test]
fn test_native_word_round_trip() {
    if NATIVE.order == ByteOrder::Middle {
        return;
    }
    let width = size_of::<usize>();
    let value = 0x0102_0304_0506_0708u64 as usize;

    let asc = NativeAsc::from_word(value as *mut ());
    assert_eq!(asc.to_bytes(), value.to_ne_bytes());
    let desc = NativeDesc::from_word(value as *mut ());
    assert_eq!(desc.to_bytes(), value.to_ne_bytes());
    for position in 0..width {
        assert_eq!(asc.byte(position), (value >> (8 * position)) as u8);
        assert_eq!(desc.byte(position), (value >> (8 * (width - 1 - position))) as u8);
    }

    let mut rebuilt = NativeDesc::new();
    for position in 0..width {
        rebuilt.set_byte(position, desc.byte(position));
    }
    assert_eq!(rebuilt.word() as usize, value);
    assert_eq!(rebuilt.hex().to_string(), format!("{value:0w$x}", w = 2 * width));
    assert_eq!(asc.hex().to_string(), desc.hex().to_string());
}

#[test]
fn test_union_views_agree() {
    let mut word = NativeAsc::new();
    word.set_word(0x1234 as *mut ());
    assert_eq!(word.bytes().to_bytes(), word.to_bytes());
    word.bytes_mut().set_u8_0(0);
    assert_eq!(NativeAsc::from_bytes(word.to_bytes()), word);
}

#[test]
fn test_tagged_pointer() {
    if NATIVE.order == ByteOrder::Middle {
        return;
    }
    let raw = Box::into_raw(Box::new(42u32));
    let mut tagged = TaggedPtr::from_word(raw.cast());
    assert_eq!(tagged.u8_0() & 0b11, 0);

    tagged.set_tag(tagged.u8_0() | 0b01);
    assert_eq!(tagged.word() as usize, raw as usize | 1);

    tagged.set_tag(tagged.u8_0() & !0b11);
    assert_eq!(tagged.word() as usize, raw as usize);
    drop(unsafe { Box::from_raw(raw) });
}
