use bytes::{Buf, BufMut};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::control_point::code::Code;

pub trait BufExt: Buf {
    /// Reads one octet as a [`Code`], keeping unrecognized values.
    fn get_code<T: FromPrimitive>(&mut self) -> Code<T> {
        Code::from_u8(self.get_u8())
    }
}

impl<B: Buf> BufExt for B {}

pub trait BufMutExt: BufMut {
    fn put_code<T: ToPrimitive + Copy>(&mut self, code: Code<T>) {
        self.put_u8(code.raw())
    }
}

impl<B: BufMut> BufMutExt for B {}
