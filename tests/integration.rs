//! Running small programs through Chimp's public API
use chimp::*;

fn setup_environment(program: &[u8]) -> Interpreter<Screen, BeepCounter> {
    let mut cpu = Interpreter::new(Screen::new(), BeepCounter::default());
    cpu.load_program(program).unwrap();
    cpu
}

mod power_on {
    use super::*;
    #[test]
    fn font_is_loaded() {
        let cpu = setup_environment(&[]);
        assert_eq!(&FONT[..], cpu.mem().get_region(Charset));
        assert_eq!(0x200, cpu.pc());
        assert_eq!(0, cpu.i());
        assert_eq!(0, cpu.cycle());
        assert!(cpu.stack().is_empty());
    }
}

mod programs {
    use super::*;
    #[test]
    fn cls_requests_redraw() {
        let mut cpu = setup_environment(&[0x00, 0xe0]);
        cpu.step().unwrap();
        assert!(cpu.should_redraw());
        assert_eq!(0, cpu.screen().lit());
        cpu.clear_redraw();
        assert!(!cpu.should_redraw());
    }
    #[test]
    fn jump_to_end_of_memory() {
        let mut cpu = setup_environment(&[0x1f, 0xff]);
        cpu.step().unwrap();
        assert_eq!(0x0fff, cpu.pc());
    }
    #[test]
    fn load_then_add() {
        let mut cpu = setup_environment(&[0x61, 0x01, 0x71, 0x01]);
        cpu.multistep(2).unwrap();
        assert_eq!(2, cpu.v()[1]);
    }
    #[test]
    fn add_with_carry() {
        let mut cpu = setup_environment(&[0x81, 0x24]);
        cpu.set_v(1, 0xff).unwrap();
        cpu.set_v(2, 0x01).unwrap();
        cpu.step().unwrap();
        assert_eq!(0, cpu.v()[1]);
        assert_eq!(1, cpu.v()[0xf]);
    }
    #[test]
    fn zero_is_unknown() {
        let mut cpu = setup_environment(&[0x00, 0x00]);
        assert!(matches!(
            cpu.step(),
            Err(Error::UnknownOpcode { word: 0x0000 })
        ));
    }
    #[test]
    fn subroutine() {
        #[rustfmt::skip]
        let mut cpu = setup_environment(&[
            0x22, 0x06, // 200: call 206
            0x63, 0x33, // 202: mov  #33, v3
            0x12, 0x04, // 204: jmp  204
            0x64, 0x44, // 206: mov  #44, v4
            0x00, 0xee, // 208: ret
        ]);
        cpu.multistep(4).unwrap();
        assert_eq!(0x204, cpu.pc());
        assert_eq!(0x33, cpu.v()[3]);
        assert_eq!(0x44, cpu.v()[4]);
        assert!(cpu.stack().is_empty());
    }
    #[test]
    fn bcd_of_a_counter() {
        #[rustfmt::skip]
        let mut cpu = setup_environment(&[
            0x60, 0xfe, // mov  #fe, v0
            0xa3, 0x00, // mov  $300, I
            0xf0, 0x33, // bcd  v0, &I
            0xf2, 0x65, // dmai v2
        ]);
        cpu.multistep(4).unwrap();
        assert_eq!(&[2, 5, 4], &cpu.v()[0..3]);
        assert_eq!(0x300, cpu.i());
    }
    #[test]
    fn draw_glyph_twice() {
        #[rustfmt::skip]
        let mut cpu = setup_environment(&[
            0x60, 0x08, // mov  #08, v0
            0xf0, 0x29, // font v0, I
            0xd1, 0x25, // draw #5, v1, v2
            0xd1, 0x25, // draw #5, v1, v2
        ]);
        cpu.multistep(3).unwrap();
        // "8" has 16 lit pixels
        assert_eq!(16, cpu.screen().lit());
        assert_eq!(0, cpu.v()[0xf]);
        cpu.step().unwrap();
        assert_eq!(0, cpu.screen().lit());
        assert_eq!(1, cpu.v()[0xf]);
    }
    #[test]
    fn beep() {
        // mov #03, v0; mov v0, ST; jmp 204
        let mut cpu = setup_environment(&[0x60, 0x03, 0xf0, 0x18, 0x12, 0x04]);
        cpu.multistep(10).unwrap();
        assert_eq!(0, cpu.sound());
        assert_eq!(1, cpu.speaker().beeps);
    }
}

mod keys {
    use super::*;
    #[test]
    fn press_then_release() {
        let mut cpu = setup_environment(&[]);
        assert!(cpu.press(0x5).unwrap());
        assert!(cpu.keys()[0x5]);
        assert!(cpu.release(0x5).unwrap());
        assert!(!cpu.keys()[0x5]);
    }
    #[test]
    fn out_of_range() {
        let mut cpu = setup_environment(&[]);
        assert!(matches!(cpu.press(16), Err(Error::InvalidKey { key: 16 })));
    }
    #[test]
    fn wait_for_key() {
        // waitk v4; sek v4; jmp 200; mov #01, v5
        let mut cpu = setup_environment(&[0xf4, 0x0a, 0xe4, 0x9e, 0x12, 0x00, 0x65, 0x01]);
        cpu.multistep(5).unwrap();
        assert_eq!(State::WaitingForKey { register: 4 }, cpu.state());
        assert_eq!(1, cpu.cycle());
        cpu.press(0x9).unwrap();
        cpu.multistep(2).unwrap();
        assert_eq!(0x9, cpu.v()[4]);
        assert_eq!(1, cpu.v()[5]);
    }
}

mod devices {
    use super::*;
    #[test]
    fn patch_memory() {
        // jmp 200, patched into mov #42, v0
        let mut cpu = setup_environment(&[0x12, 0x00]);
        cpu.mem_mut().write_word(0x200u16, 0x6042);
        cpu.step().unwrap();
        assert_eq!(0x42, cpu.v()[0]);
    }
    #[test]
    fn collide_with_host_pixels() {
        // draw #1, v0, v0 with I at the top of "0"
        let mut cpu = setup_environment(&[0xd0, 0x01]);
        cpu.screen_mut().set_pixel(0, 0);
        cpu.step().unwrap();
        assert_eq!(1, cpu.v()[0xf]);
        assert!(!cpu.screen().pixel(0, 0));
    }
    #[test]
    fn reset_speaker() {
        // mov #01, v0; mov v0, ST; jmp 204
        let mut cpu = setup_environment(&[0x60, 0x01, 0xf0, 0x18, 0x12, 0x04]);
        cpu.multistep(2).unwrap();
        assert_eq!(1, cpu.speaker().beeps);
        *cpu.speaker_mut() = BeepCounter::default();
        cpu.multistep(2).unwrap();
        assert_eq!(0, cpu.speaker().beeps);
    }
}

mod stack {
    use super::*;
    #[test]
    fn overflows_at_seventeen() {
        let mut cpu = setup_environment(&[0x22, 0x00]);
        cpu.multistep(STACK_DEPTH).unwrap();
        assert!(matches!(cpu.step(), Err(Error::StackOverflow)));
    }
    #[test]
    fn underflows_when_empty() {
        let mut cpu = setup_environment(&[0x00, 0xee]);
        assert!(matches!(cpu.step(), Err(Error::StackUnderflow)));
    }
}

mod loading {
    use super::*;
    #[test]
    fn largest_program_fits() {
        let mut cpu = setup_environment(&[]);
        cpu.load_program(&[0x12; 0xe00]).unwrap();
        assert_eq!(0x12, cpu.mem().read(0xfffu16));
    }
    #[test]
    fn too_large() {
        let mut cpu = setup_environment(&[]);
        assert!(matches!(
            cpu.load_program(&[0; 0xe01]),
            Err(Error::ProgramTooLarge { len: 0xe01, max: 0xe00 })
        ));
    }
    #[test]
    fn missing_file() {
        let mut cpu = setup_environment(&[]);
        assert!(matches!(
            cpu.load_program_file("/nonexistent/chimp.ch8"),
            Err(Error::IoError(_))
        ));
    }
    #[test]
    fn reset_keeps_program() {
        let mut cpu = setup_environment(&[0x61, 0x01, 0x71, 0x01]);
        cpu.multistep(2).unwrap();
        cpu.reset();
        assert_eq!(0, cpu.v()[1]);
        cpu.multistep(2).unwrap();
        assert_eq!(2, cpu.v()[1]);
    }
}

mod shared {
    use super::*;
    #[test]
    fn key_from_another_thread() {
        let shared = SharedInterpreter::new(setup_environment(&[0xf1, 0x0a, 0x12, 0x02]));
        shared.step().unwrap();
        let remote = shared.clone();
        std::thread::spawn(move || remote.press(0xe).unwrap())
            .join()
            .unwrap();
        shared.multistep(3).unwrap();
        assert_eq!(0xe, shared.with(|cpu| cpu.v()[1]));
    }
}
