pub fn to_hex_str<T>(bytes: &T) -> String
where
    T: AsRef<[u8]> + ?Sized,
{
    let x = bytes.as_ref();

    x.iter()
        .map(|v| format!("{:02x}", v))
        .collect::<Vec<String>>()
        .join("")
}

// Display form used for raw extension dumps. Separator placement is driven
// by the accumulated character count of the output built so far, separators
// included, not by the byte index: after the first byte the count stays odd,
// so the remainder of a run prints unbroken.
pub fn hex_dump<T>(bytes: &T) -> String
where
    T: AsRef<[u8]> + ?Sized,
{
    let mut out = String::new();

    for v in bytes.as_ref() {
        out.push_str(&format!("{:02x}", v));
        if out.len() % 32 == 0 {
            out.push_str("\n    ");
        } else if out.len() % 2 == 0 {
            out.push(' ');
        }
    }

    out.trim().to_owned()
}

pub trait VecInto<D> {
    fn vec_into(self) -> Vec<D>;
}

impl<E, D> VecInto<D> for Vec<E>
where
    D: From<E>,
{
    fn vec_into(self) -> Vec<D> {
        self.into_iter().map(Into::into).collect()
    }
}
