//! Testing methods on Chimp's structs
use chimp::*;
use std::{collections::hash_map::DefaultHasher, hash::Hash};

#[test]
fn interpreter() {
    let cpu: Interpreter = Interpreter::default(); // Default
    let cpu2 = cpu.clone(); // Clone
    assert_eq!(cpu, cpu2); // PartialEq
    println!("{cpu:?}"); // Debug
}

mod error {
    use super::*;
    #[test]
    fn display() {
        for error in [
            Error::StackOverflow,
            Error::StackUnderflow,
            Error::UnknownOpcode { word: 0x0000 },
            Error::InvalidKey { key: 0x10 },
            Error::InvalidRegister { reg: 0x10 },
            Error::ProgramTooLarge { len: 0xe01, max: 0xe00 },
        ] {
            println!("{error} {error:?}");
        }
    }
    #[test]
    fn unknown_opcode_names_the_word() {
        assert!(Error::UnknownOpcode { word: 0xf0ff }
            .to_string()
            .contains("f0ff"));
    }
    #[test]
    fn from_io() {
        let error: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(error, Error::IoError(_)));
    }
}

mod region {
    use super::*;
    //  #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[test]
    fn copy() {
        let r1 = Program;
        let r2 = r1;
        assert_eq!(r1, r2);
    }
    #[test]
    fn display() {
        assert_eq!("Charset Program", format!("{Charset} {Program}"));
    }
    #[test]
    fn debug() {
        println!("{Charset:?}{Program:?}");
    }
    #[test]
    fn ord() {
        assert_eq!(Program, Charset.max(Program));
        assert!(Charset < Program);
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Program.hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod mem {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Mem::new(), Mem::default());
    }
    #[test]
    fn clone() {
        let mut mem1 = Mem::new();
        mem1.write(0x300u16, 0xaa);
        let mem2 = mem1.clone();
        assert_eq!(mem1, mem2);
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Mem::new().hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod stack {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Stack::new(), Stack::default());
        assert!(Stack::default().is_empty());
    }
    #[test]
    fn clone() {
        let mut stack1 = Stack::new();
        stack1.push(0x234).unwrap();
        let stack2 = stack1.clone();
        assert_eq!(stack1, stack2);
        assert_eq!(&[0x234], stack2.as_slice());
    }
}

mod state {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(State::Running, State::default());
    }
    #[test]
    fn display() {
        assert_eq!("running", State::Running.to_string());
        assert_eq!(
            "waiting for key -> vA",
            State::WaitingForKey { register: 0xa }.to_string()
        );
    }
    #[test]
    fn ord() {
        assert!(State::Running < State::WaitingForKey { register: 0 });
    }
}

mod screen {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Screen::new(), Screen::default());
    }
    #[test]
    fn dimensions() {
        let screen = Screen::new();
        assert_eq!(WIDTH, screen.width());
        assert_eq!(HEIGHT, screen.height());
        assert_eq!(WIDTH * HEIGHT / 8, screen.as_slice().len());
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Screen::new().hash(&mut hasher);
        println!("{hasher:?}");
    }
    #[test]
    fn print_screen() {
        let mut screen = Screen::new();
        screen.set_pixel(0, 0);
        screen.set_pixel(WIDTH - 1, HEIGHT - 1);
        screen.print_screen();
        assert_eq!(2, screen.lit());
    }
}

mod insn {
    use super::*;
    #[test]
    fn display() {
        assert_eq!("jmp    fff", Insn::jmp { A: 0xfff }.to_string());
        assert_eq!("add    v2, v1", Insn::add { y: 2, x: 1 }.to_string());
    }
    #[test]
    fn copy() {
        let i1 = Insn::cls;
        let i2 = i1;
        assert_eq!(i1, i2);
    }
}

mod speaker {
    use super::*;
    #[test]
    fn beep_counter() {
        let mut speaker = BeepCounter::default();
        speaker.beep();
        speaker.beep();
        assert_eq!(2, speaker.beeps);
    }
    #[test]
    fn silent() {
        let mut speaker = Silent;
        speaker.beep();
        assert_eq!(Silent, speaker);
    }
}

#[cfg(feature = "serde")]
mod serde {
    use super::*;
    fn assert_serde<T: ::serde::Serialize + for<'de> ::serde::Deserialize<'de>>(_: &T) {}
    #[test]
    fn plain_data_is_serializable() {
        assert_serde(&Mem::new());
        assert_serde(&Stack::new());
        assert_serde(&Screen::new());
        assert_serde(&State::Running);
        assert_serde(&Insn::cls);
        assert_serde(&Program);
    }
}
