use crate::env::Size;
use crate::input::{ErrorKind, IStr};

#[test]
fn test_lines() {
    let mut input = IStr::new(b"abc\n\ndef", Size::ZERO);

    assert_eq!(input.try_line::<&str>().unwrap(), Some("abc"));
    assert_eq!(input.try_line::<&str>().unwrap(), Some(""));

    let line = input.line::<IStr>().unwrap();
    assert_eq!(line.as_data(), b"def");
    assert_eq!(line.index().get(), 5);

    assert!(input.try_line::<&str>().unwrap().is_none());
    assert!(matches!(
        input.line::<&str>().unwrap_err().kind(),
        ErrorKind::ExpectedLine
    ));
}

#[test]
fn test_line_spans() {
    let mut input = IStr::new(b"ab\r\ncd\r\n", Size::ZERO);

    let first = input.line::<IStr>().unwrap();
    let second = input.line::<IStr>().unwrap();

    assert_eq!(first.as_data(), b"ab");
    assert_eq!(Size::usize_range(first.span()), 0..2);
    assert_eq!(second.as_data(), b"cd");
    assert_eq!(Size::usize_range(second.span()), 4..6);
}

#[test]
fn test_integers() {
    let mut input = IStr::new(b"  12 -7\n300", Size::ZERO);

    assert_eq!(input.next::<u32>().unwrap(), 12);
    assert_eq!(input.next::<i32>().unwrap(), -7);
    assert_eq!(input.try_next::<u16>().unwrap(), Some(300));
    assert_eq!(input.try_next::<u16>().unwrap(), None);

    let error = input.next::<u64>().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::UnexpectedEof));
}

#[test]
fn test_not_integer() {
    let mut input = IStr::new(b"12 ab3", Size::ZERO);

    assert_eq!(input.next::<u8>().unwrap(), 12);

    let error = input.next::<u8>().unwrap_err();
    assert_eq!(Size::usize_range(error.span()), 3..6);
    assert!(matches!(error.kind(), ErrorKind::NotInteger("ab3")));
}

#[test]
fn test_integer_overflow() {
    let mut input = IStr::new(b"256", Size::ZERO);
    let error = input.next::<u8>().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::NotInteger("256")));
}

#[test]
fn test_not_utf8() {
    let mut input = IStr::new(b"ok\n\xff\xfe\n", Size::ZERO);

    assert_eq!(input.line::<&str>().unwrap(), "ok");

    let error = input.line::<&str>().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::NotUtf8));
    assert_eq!(Size::usize_range(error.span()), 3..5);
}
