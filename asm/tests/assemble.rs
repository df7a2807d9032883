use arch::field::{ADDR12, MID8};
use arch::{EncodeError, Target};
use mincasm::{assemble, Assembler, Error};

macro_rules! case {
    ($name:ident, $target:expr, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            let words = assemble($code, $target).unwrap();
            let hex: Vec<String> = words.iter().map(|w| $target.hex(*w)).collect();
            println!("{:?}", hex);
            assert_eq!(words, $expect);
        }
    };
}

macro_rules! fail {
    ($name:ident, $target:expr, $code:expr, $err:pat) => {
        #[test]
        fn $name() {
            let diags = assemble($code, $target).unwrap_err();
            for diag in &diags {
                println!("line {}: {}", diag.line + 1, diag.error);
            }
            assert!(diags.iter().any(|diag| matches!(diag.error, $err)));
        }
    };
}

case!(
    stack_all_arith,
    Target::Stack,
    "ld 1\nld 2\nadd\nsub\nmul",
    vec![0x001, 0x002, 0x100, 0x200, 0x300]
);
case!(
    stack_compare,
    Target::Stack,
    "lt\ngt\neq\ndrop\nret\nhalt",
    vec![0x400, 0x500, 0x600, 0x900, 0xD00, 0xFFF]
);
case!(immediate_max, Target::Stack, "ld 255", vec![0x0FF]);
case!(
    reg_sequence,
    Target::Reg,
    "mvi r0,5\npush r0\npop r1\nadd r0,r1\nhalt",
    vec![0x1005, 0x0800, 0x0A10, 0x0101, 0xFFFF]
);
case!(
    comments_and_blanks,
    Target::Reg,
    "; header\n\n  mvi r2, 3 ; three\n\t\nret",
    vec![0x1203, 0x0C00]
);
case!(
    forward_label,
    Target::Reg,
    "jmp end\nmvi r0,1\nend:\nhalt",
    vec![0x2002, 0x1001, 0xFFFF]
);
case!(
    backward_label,
    Target::Reg,
    "mvi r0,1\ntop: push r0\njnz top,r0",
    vec![0x1001, 0x0800, 0x6010]
);
case!(
    self_reference,
    Target::Reg,
    "mvi r0,0\nspin: jz spin,r0",
    vec![0x1000, 0x4010]
);
case!(
    forward_many,
    Target::Stack,
    "jz out\ncall out\nld 1\nout: jmp out",
    vec![0xB03, 0xC03, 0x001, 0xA03]
);
case!(
    label_on_own_line_before_code,
    Target::Stack,
    "a:\nb:\nld 7\njmp a\njmp b",
    vec![0x007, 0xA00, 0xA00]
);
case!(
    numeric_address,
    Target::Reg,
    "call 0x10\njmp 0xFFF",
    vec![0x0510, 0x2FFF]
);

fail!(
    invalid_mnemonic,
    Target::Stack,
    "foo",
    Error::InvalidInstruction(_)
);
fail!(
    immediate_over,
    Target::Stack,
    "ld 256",
    Error::Encode(EncodeError::ImmediateOutOfRange(256, 255))
);
fail!(
    immediate_negative,
    Target::Reg,
    "mvi r0,-1",
    Error::Encode(EncodeError::ImmediateOutOfRange(-1, 255))
);
fail!(
    register_over,
    Target::Reg,
    "push r8",
    Error::RegisterOutOfRange(_)
);
fail!(
    operand_count,
    Target::Reg,
    "add r0",
    Error::Encode(EncodeError::OperandCount(..))
);
fail!(
    operand_kind,
    Target::Reg,
    "mvi r0,r1",
    Error::Encode(EncodeError::InvalidOperand(..))
);
fail!(
    undefined_label,
    Target::Reg,
    "jmp nowhere\nhalt",
    Error::UndefinedLabel(_)
);
fail!(
    duplicate_label,
    Target::Reg,
    "x: halt\nx: halt",
    Error::DuplicateLabel(_, 1)
);

#[test]
fn forward_address_too_far() {
    let mut code = String::from("jz far,r0\n");
    code.push_str(&"ret\n".repeat(300));
    code.push_str("far: halt\n");
    let diags = assemble(&code, Target::Reg).unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 0);
    assert_eq!(
        diags[0].error,
        Error::Encode(EncodeError::AddressOutOfRange(301, 255))
    );
}

#[test]
fn all_errors_reported() {
    let diags = assemble("foo\nld 1\nmvi r0,999\njmp missing", Target::Reg).unwrap_err();
    let lines: Vec<usize> = diags.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![0, 1, 2, 3]);
    assert_eq!(diags[3].text, "jmp missing");
}

#[test]
fn fixups_are_per_run() {
    let mut first = Assembler::new(Target::Stack);
    first.feed("jmp later");
    assert!(first.finish().is_err());

    let mut second = Assembler::new(Target::Stack);
    second.feed("later: jmp later");
    let output = second.finish().unwrap();
    assert_eq!(output.words, vec![0xA00]);
    assert_eq!(output.labels.get("later"), Some(0));
}

#[test]
fn rows_track_addresses() {
    let mut assembler = Assembler::new(Target::Reg);
    for line in ["start:", "mvi r0,1", "; note", "halt"] {
        assembler.feed(line);
    }
    let output = assembler.finish().unwrap();
    let addrs: Vec<u16> = output.rows.iter().map(|r| r.addr).collect();
    assert_eq!(addrs, vec![0, 0, 1, 1]);
    assert_eq!(output.labels.iter().collect::<Vec<_>>(), vec![("start", 0)]);
}

#[test]
fn field_placement() {
    // jz/jnz branch targets sit in n1n2, long jumps in n1n2n3
    assert_eq!(MID8.pack(0x12), 0x0120);
    assert_eq!(ADDR12.pack(0x123), 0x0123);
    let words = assemble("jnz t,r3\njmp t\nt: halt", Target::Reg).unwrap();
    assert_eq!(words, vec![0x6023, 0x2002, 0xFFFF]);
}

#[test]
fn hex_listing_widths() {
    // stack words print as three digits, register words as four
    let stack = assemble("ld 1\nld 2\nadd\nsub\nmul", Target::Stack).unwrap();
    let text: Vec<String> = stack.iter().map(|w| Target::Stack.hex(*w)).collect();
    assert_eq!(text.join("\n"), "001\n002\n100\n200\n300");

    let reg = assemble("mvi r0,1\nhalt", Target::Reg).unwrap();
    let text: Vec<String> = reg.iter().map(|w| Target::Reg.hex(*w)).collect();
    assert_eq!(text, vec!["1001", "FFFF"]);
}

#[test]
fn stack_jump_range() {
    let mut code = String::from("jmp far\n");
    code.push_str(&"drop\n".repeat(255));
    code.push_str("far: ret\n");
    let diags = assemble(&code, Target::Stack).unwrap_err();
    assert_eq!(
        diags[0].error,
        Error::Encode(EncodeError::AddressOutOfRange(256, 255))
    );
    assert!(assemble("store 255\nload 0", Target::Stack).is_ok());
    assert!(assemble("store 256", Target::Stack).is_err());
}

#[test]
fn full_address_space() {
    let mut assembler = Assembler::new(Target::Reg);
    for _ in 0..=u16::MAX {
        assembler.feed("ret");
    }
    assembler.feed("; trailing comment");
    assembler.feed("");
    let output = assembler.finish().unwrap();
    assert_eq!(output.words.len(), 1 << 16);

    let mut assembler = Assembler::new(Target::Reg);
    for _ in 0..=u16::MAX {
        assembler.feed("ret");
    }
    assembler.feed("ret");
    let diags = assembler.finish().unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 1 << 16);
    assert_eq!(diags[0].error, Error::ProgramTooLarge(1 << 16));
}
